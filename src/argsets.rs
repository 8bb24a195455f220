pub struct CallArgs {
    pub action: String,
    pub device_id: String,
}
