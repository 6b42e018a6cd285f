fn main() -> anyhow::Result<()> {
    log_sieve::run()
}
