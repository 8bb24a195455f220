pub fn load_dotenv() {
    // stdout is reserved for command output, so report on stderr
    if dotenv::dotenv().is_ok() {
        eprintln!("Loaded local .env")
    }
}
