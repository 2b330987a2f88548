fn main() {
    if let Err(e) = platform_state::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
