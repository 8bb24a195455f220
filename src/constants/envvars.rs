pub const LOG_LEVEL: &str = "LOG_LEVEL";

pub const TB_HOST: &str = "TB_HOST";
pub const TB_USER: &str = "TB_USER";
pub const TB_PASS: &str = "TB_PASS";
pub const TB_PROXY_ADDR: &str = "TB_PROXY_ADDR";
