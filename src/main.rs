fn main() {
    if let Err(err) = block_schedule::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
