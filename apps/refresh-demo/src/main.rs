mod feed;
mod nine_patch_preview;

use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== dqtool refresh demo ===");
    println!("Scrolls a paginated feed until the server runs out of pages,");
    println!("then pulls to refresh. Pass a PNG path to slice it as a nine-patch.");
    println!();

    feed::run()?;

    let png = std::env::args_os().nth(1).map(PathBuf::from);
    nine_patch_preview::run(png.as_deref())?;
    Ok(())
}
