fn main() {
    if let Err(err) = codeface::cli::main() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
