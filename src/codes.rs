//! Static lookups from firmware finish/error/PLC codes to symbolic labels.
//!
//! Unknown codes map to an empty string.

const FINISH_CODES: &[(&str, &str)] = &[
    ("1", "FINISH_CODE_USER_STOP"),
    ("2", "FINISH_CODE_SESSION_STOP"),
    ("3", "FINISH_CODE_S3_STOP"),
    ("4", "FINISH_CODE_PAYMENT_TIMEOUT"),
    ("5", "FINISH_CODE_EV_STOP"),
    ("6", "FINISH_CODE_READY_TO_CHARGE_OFF"),
];

const ERROR_CODES: &[(&str, &str)] = &[
    ("3", "ERR_CODE_PC_MC_CONTACT_ERR"),
    ("7", "ERR_CODE_PWR_MD_AC_UNDER"),
    ("8", "ERR_CODE_PWR_MD_AC_OVER"),
    ("10", "ERR_CODE_OVER_VOLTAGE"),
    ("11", "ERR_CODE_OVER_CURRENT"),
    ("13", "ERR_CODE_EMG_SW_PUSH"),
    ("14", "ERR_CODE_IMD_FAULT"),
    ("41", "ERR_CODE_PRECHARGE_VOLTAGE_NOT_ENOUGH"),
    ("42", "ERR_CODE_SECC_REPORTINIT_RES_TIMEOUT"),
    ("44", "ERR_CODE_SECC_PRECOMMUNICATION_TIMEOUT"),
    ("45", "ERR_CODE_SECC_CHARGE_PARAMETER_TIMEOUT"),
    ("46", "ERR_CODE_SECC_CABLE_CHECK_TIMEOUT"),
    ("47", "ERR_CODE_SECC_PRECHARGE_TIMEOUT"),
    ("48", "ERR_CODE_SECC_CURRENT_DEMAND_TIMEOUT"),
    ("49", "ERR_CODE_COUPLER_TEMP_HIGH"),
    ("53", "ERR_CODE_CONTRACT_TIMEOUT"),
    ("54", "ERR_CODE_CP_LEVEL_12V"),
    ("56", "ERR_CODE_CP_LEVEL_PE"),
    ("74", "ERR_CODE_PP_LEVEL"),
    ("97", "ERR_CODE_MCU_HARD_FAULT"),
    ("121", "ERR_CODE_HMI_COMMUNICATION"),
    ("218", "ERR_CODE_IMD_COMMUNICATION"),
    ("242", "ERR_CODE_DP_DOOR"),
    ("243", "ERR_CODE_CP_DOOR"),
    ("244", "ERR_CODE_BANK_ERROR"),
    ("245", "ERR_CODE_IMD_STATE"),
    ("260", "ERR_CODE_N_TEP_COMMUNICATION"),
    ("261", "ERR_CODE_PC_COMMUNICATION"),
    ("262", "ERR_CODE_PC_RELAYBOX_COMM_ERROR"),
    ("263", "ERR_CODE_PC_ASSIGN_FAIL_ERROR"),
    ("264", "ERR_CODE_PC_RELAYBOX_PWR_MD_FAULT"),
    ("265", "ERR_CODE_PC_DC_SHORT"),
    ("266", "ERR_CODE_PWR_MD"),
    ("270", "ERR_CODE_DP_ID_COLISION"),
    ("271", "ERR_CODE_SECC_ERRCODE"),
    ("272", "ERR_CODE_SECC_READY_TO_CHARGE"),
    ("281", "ERR_CODE_SECC_REQ_OVER_VOLTAGE"),
    ("282", "ERR_CODE_SECC_OUT_MAX_PWR_OVER"),
    ("283", "ERR_CODE_SECC_OUT_MAX_V_OVER"),
    ("284", "ERR_CODE_SECC_OUT_MAX_A_OVER"),
    ("285", "ERR_CODE_CP_FG_SHORT"),
    ("286", "ERR_CODE_CABLECHECK_VOLTAGE_FLOAT"),
    ("287", "ERR_CODE_IMD_VOLTAGE_ERR"),
    ("288", "ERR_CODE_ADC_VOLTAGE_ERR"),
    ("289", "ERR_CODE_ADC_CURRENT_ERR"),
    ("300", "ERR_CODE_WARING_EV_MAX_VOLTAGE_OVER"),
    ("301", "ERR_CODE_PB_ERR_ID_COLLISOIN"),
    ("302", "ERR_CODE_PB_ERR_CAN1_COMM"),
    ("303", "ERR_CODE_PB_ERR_CAN2_COMM"),
    ("304", "ERR_CODE_PB_ERR_PS_LOGIC_COLLISION"),
    ("305", "ERR_CODE_CH_ERR_ASSING_FAIL"),
    ("306", "ERR_CODE_CHARGING_VOLTAGE_OUT_OF_RANGE"),
    ("307", "ERR_CODE_EV_ERROR_Reserved_A"),
    ("308", "ERR_CODE_EV_ERROR_Reserved_B"),
    ("309", "ERR_CODE_CH_ERR_ALL_RLYBOX_ERR"),
    ("310", "ERR_CODE_CHARGING_SYSTEM_INCOMPATIBILITY"),
    ("311", "ERR_CODE_EV_NO_DATA"),
    ("1001", "ERR_CODE_OVER_HMI_PWR"),
    ("1002", "ERR_CODE_OVER_CPL_CUR"),
    ("1003", "ERR_CODE_OVER_CURRENT"),
    ("1101", "ERR_CODE_ELCB_SHUTDOWN"),
    ("1102", "ERR_CODE_FUSE_DISCONNECT"),
    ("1103", "ERR_CODE_AC_SPD_SHUTDOWN"),
    ("1104", "ERR_CODE_PWR_MD_AC_UNDER"),
    ("1105", "ERR_CODE_PWR_MD_AC_OVER"),
    ("1106", "ERR_CODE_PWR_MD_CUR_OVER"),
    ("1107", "ERR_CODE_PWR_MD_AC_CUR_OVER_L1"),
    ("1108", "ERR_CODE_PWR_MD_AC_CUR_OVER_L2"),
    ("1109", "ERR_CODE_PWR_MD_AC_CUR_OVER_L3"),
    ("1201", "ERR_CODE_NON_PWR_MD_IN_GRUP"),
    ("2001", "ERR_CODE_PWR_MD_01_DC_SHORT"),
    ("2002", "ERR_CODE_PWR_MD_02_DC_SHORT"),
    ("2003", "ERR_CODE_PWR_MD_03_DC_SHORT"),
    ("2004", "ERR_CODE_PWR_MD_04_DC_SHORT"),
    ("2005", "ERR_CODE_PWR_MD_05_DC_SHORT"),
    ("2006", "ERR_CODE_PWR_MD_06_DC_SHORT"),
    ("2007", "ERR_CODE_PWR_MD_07_DC_SHORT"),
    ("2008", "ERR_CODE_PWR_MD_08_DC_SHORT"),
    ("2101", "ERR_CODE_PWR_MD_01_SHORT_CIRCUIT"),
    ("2102", "ERR_CODE_PWR_MD_02_SHORT_CIRCUIT"),
    ("2103", "ERR_CODE_PWR_MD_03_SHORT_CIRCUIT"),
    ("2104", "ERR_CODE_PWR_MD_04_SHORT_CIRCUIT"),
    ("2105", "ERR_CODE_PWR_MD_05_SHORT_CIRCUIT"),
    ("2106", "ERR_CODE_PWR_MD_06_SHORT_CIRCUIT"),
    ("2107", "ERR_CODE_PWR_MD_07_SHORT_CIRCUIT"),
    ("2108", "ERR_CODE_PWR_MD_08_SHORT_CIRCUIT"),
    ("2201", "ERR_CODE_PWR_MD_01_BLEED_NOT_WORK"),
    ("2202", "ERR_CODE_PWR_MD_02_BLEED_NOT_WORK"),
    ("2203", "ERR_CODE_PWR_MD_03_BLEED_NOT_WORK"),
    ("2204", "ERR_CODE_PWR_MD_04_BLEED_NOT_WORK"),
    ("2205", "ERR_CODE_PWR_MD_05_BLEED_NOT_WORK"),
    ("2206", "ERR_CODE_PWR_MD_06_BLEED_NOT_WORK"),
    ("2207", "ERR_CODE_PWR_MD_07_BLEED_NOT_WORK"),
    ("2208", "ERR_CODE_PWR_MD_08_BLEED_NOT_WORK"),
    ("3001", "ERR_CODE_IMD_VOL_DAMAGE"),
    ("3101", "ERR_CODE_DC_METER_COMM"),
    ("3102", "ERR_CODE_DC_METER_VOL_DAMAGE"),
    ("3103", "ERR_CODE_DC_METER_CUR_DAMAGE"),
    ("4001", "ERR_CODE_WELDING_MC"),
    ("4101", "ERR_CODE_WELDING_RELAY01"),
    ("4102", "ERR_CODE_WELDING_RELAY02"),
    ("4103", "ERR_CODE_WELDING_RELAY03"),
    ("4104", "ERR_CODE_WELDING_RELAY04"),
    ("4105", "ERR_CODE_WELDING_RELAY05"),
    ("4106", "ERR_CODE_WELDING_RELAY06"),
    ("4201", "ERR_CODE_MALFUNC_MC"),
    ("4301", "ERR_CODE_MALFUNC_RELAY01"),
    ("4302", "ERR_CODE_MALFUNC_RELAY02"),
    ("4303", "ERR_CODE_MALFUNC_RELAY03"),
    ("4304", "ERR_CODE_MALFUNC_RELAY04"),
    ("4305", "ERR_CODE_MALFUNC_RELAY05"),
    ("4306", "ERR_CODE_MALFUNC_RELAY06"),
    ("4401", "ERR_CODE_TILT_SENSOR"),
    ("4404", "ERR_CODE_OVER_TEMP"),
    ("4410", "ERR_CODE_SUBMERSION_TEMP"),
    ("9001", "ERR_CODE_DUAL_1CHSINGLE_POWERSHARING_MALFUNC"),
    ("9002", "ERR_CODE_1CHSINGLE_DUAL_POWERSHARING_MALFUNC"),
    ("9003", "ERR_CODE_DUAL_2CHSINGLE_POWERSHARING_MALFUNC"),
    ("9004", "ERR_CODE_2CHSINGLE_DUAL_POWERSHARING_MALFUNC"),
    ("9011", "ERR_CODE_2CH_RELAY_MALFUNC"),
    ("9012", "ERR_CODE_1CH_RELAY_MALFUNC"),
    ("9013", "ERR_CODE_BRIDGE_RELAY_MALFUNC"),
    ("9100", "ERR_CODE_PWR_MD_NOT_AVAILABLE_MALFUNC"),
];

const PLC_ERROR_CODES: &[(&str, &str)] = &[
    ("17", "SECC_INIT_ERROR_IFADDR"),
    ("18", "SECC_INIT_ERROR_THREAD"),
    ("19", "SECC_INIT_ERROR_OPENCHANNEL"),
    ("20", "SECC_INIT_ERROR_KEY"),
    ("33", "SECC_SLAC_ERROR_TIMER_INIT"),
    ("34", "SECC_SLAC_ERROR_TIMER_TIMEOUT"),
    ("36", "SECC_SLAC_ERROR_PARAM_TIMEOUT"),
    ("37", "SECC_SLAC_ERROR_PARAM_SOCKET"),
    ("38", "SECC_SLAC_ERROR_START_ATTEN_CHAR_TIMEOUT"),
    ("39", "SECC_SLAC_ERROR_MNBC_SOUND_TIMEOUT"),
    ("40", "SECC_SLAC_ERROR_ATTEN_CHAR_TIMEOUT"),
    ("41", "SECC_SLAC_ERROR_ATTEN_CHAR_SOCKET"),
    ("47", "SECC_SLAC_ERROR_MATCH_TIMEOUT"),
    ("48", "SECC_SLAC_ERROR_MATCH_SOCKET"),
    ("51", "SECC_SLAC_ERROR_MATCH_TIMEOUT2"),
    ("65", "SECC_SDP_ERROR_INIT_SOCKET"),
    ("66", "SECC_SDP_ERROR_INIT_SOCKOPT1"),
    ("67", "SECC_SDP_ERROR_INIT_SOCKOPT2"),
    ("68", "SECC_SDP_ERROR_INIT_BIND"),
    ("69", "SECC_SDP_ERROR_THREAD_SOCKET1"),
    ("70", "SECC_SDP_ERROR_THREAD_SOCKET2"),
    ("71", "SECC_SDP_ERROR_TIMEOUT"),
    ("80", "SECC_DIN_ERROR_GENERAL"),
    ("81", "SECC_DIN_ERROR_INIT_SOCKET"),
    ("82", "SECC_DIN_ERROR_INIT_SOCKOPT"),
    ("83", "SECC_DIN_ERROR_INIT_BIND"),
    ("84", "SECC_DIN_ERROR_INIT_LISTEN"),
    ("85", "SECC_DIN_ERROR_INIT_SELECT"),
    ("86", "SECC_DIN_ERROR_INIT_ACCEPT"),
    ("87", "SECC_DIN_ERROR_TIMEOUT"),
    ("88", "SECC_DIN_ERROR_V2GTP_HEADER"),
    ("89", "SECC_DIN_ERROR_V2GTP_HEADER_LEN"),
    ("90", "SECC_DIN_ERROR_DECODE_EXI"),
    ("91", "SECC_DIN_ERROR_CREATE_RESPONSE"),
    ("92", "SECC_DIN_ERROR_ENCODE_EXI"),
    ("93", "SECC_DIN_ERROR_V2GTP_HEADER_WRITE"),
    ("94", "SECC_DIN_ERROR_SOCKET_EXCEPTION"),
    ("95", "SECC_DIN_ERROR_SOCKET_SEND"),
    ("96", "SECC_DIN_ERROR_NO_PROTOCOL"),
    ("128", "SECC_TLS_ERROR_HELLO_REQUEST"),
    ("129", "SECC_TLS_ERROR_CLIENT_HELLO"),
    ("130", "SECC_TLS_ERROR_SERVER_HELLO"),
    ("131", "SECC_TLS_ERROR_SERVER_CERTIFICATE"),
    ("132", "SECC_TLS_ERROR_SERVER_KEY_EXCHANGE"),
    ("133", "SECC_TLS_ERROR_CERTIFICATE_REQUEST"),
    ("134", "SECC_TLS_ERROR_SERVER_HELLO_DONE"),
    ("135", "SECC_TLS_ERROR_CLIENT_CERTIFICATE"),
    ("136", "SECC_TLS_ERROR_CLIENT_KEY_EXCHANGE"),
    ("137", "SECC_TLS_ERROR_CERTIFICATE_VERIFY"),
    ("138", "SECC_TLS_ERROR_CLIENT_CHANGE_CIPHER_SPEC"),
    ("139", "SECC_TLS_ERROR_CLIENT_FINISHED"),
    ("140", "SECC_TLS_ERROR_SERVER_CHANGE_CIPHER_SPEC"),
    ("141", "SECC_TLS_ERROR_SERVER_FINISHED"),
    ("142", "SECC_TLS_ERROR_FLUSH_BUFFERS"),
    ("143", "SECC_TLS_ERROR_HANDSHAKE_WRAPUP"),
    ("144", "SECC_TLS_ERROR_HANDSHAKE_OVER"),
    ("145", "SECC_TLS_ERROR_SERVER_NEW_SESSION_TICKET"),
    ("146", "SECC_TLS_ERROR_SERVER_HELLO_VERIFY_REQUEST_SENT"),
    ("147", "SECC_TLS_ERROR_ALERT_FATAL"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> &'static str {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, label)| *label)
        .unwrap_or("")
}

pub fn finish_code_label(code: &str) -> &'static str {
    lookup(FINISH_CODES, code)
}

pub fn error_code_label(code: &str) -> &'static str {
    lookup(ERROR_CODES, code)
}

pub fn plc_error_code_label(code: &str) -> &'static str {
    lookup(PLC_ERROR_CODES, code)
}
