fn main() -> Result<(), Box<dyn std::error::Error>> {
    lucent::cli::main()
}
