fn main() -> Result<(), Box<dyn std::error::Error>> {
    tdeck_chat::cli::main()
}
