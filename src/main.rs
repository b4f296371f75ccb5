fn main() {
    if let Err(e) = stockroom::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
