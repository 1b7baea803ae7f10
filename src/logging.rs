use chrono::Utc;
use env_logger::{Builder, Env, Target};
use std::io::Write;

/// 安装 JSON 行格式的日志 (默认级别 info, 输出到 stdout)
pub fn init_logging() {
    builder().init();
}

/// 同 [`init_logging`]，已安装过 logger 时返回错误而不是 panic
pub fn try_init_logging() -> Result<(), log::SetLoggerError> {
    builder().try_init()
}

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .format(|buf, record| {
            let ts = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
            let line = format_line(
                &ts,
                record.level().as_str(),
                &record.args().to_string(),
                record.target(),
            );
            writeln!(buf, "{line}")
        })
        .target(Target::Stdout);
    builder
}

fn format_line(timestamp: &str, level: &str, message: &str, target: &str) -> String {
    let msg_json =
        serde_json::to_string(message).unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
    format!(
        "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
        timestamp,
        level.to_ascii_lowercase(),
        msg_json,
        target,
    )
}
