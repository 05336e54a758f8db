fn main() -> anyhow::Result<()> {
    flag_quiz::run()
}
