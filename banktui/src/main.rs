use anyhow::Result;

use banktui::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is initialized in App::run()
    App::new().run().await?;

    Ok(())
}
