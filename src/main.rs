fn main() {
    spaceko_cli::cli::run();
}
