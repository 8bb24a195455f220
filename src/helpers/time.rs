use chrono::Utc;

pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
