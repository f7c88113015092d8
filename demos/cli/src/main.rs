use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use timeline_core::{TimelineConfig, DEFAULT_PAGE_SIZE};
use timeline_dataset::dataset_from_str;
use timeline_ui::{PageControl, StringSurface, TimelineControl, TimelineRenderer};

#[derive(Parser, Debug)]
#[command(
    name = "activity-timeline-cli",
    about = "Render timeline hoạt động từ file dataset JSON ra HTML."
)]
struct Args {
    /// Đường dẫn tới file JSON (dataset của control hoặc collection Web API).
    #[arg(short, long)]
    input: PathBuf,

    /// Trang cần render (bắt đầu từ 1).
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Render lần lượt mọi trang, như khi bấm Next liên tục.
    #[arg(long, conflicts_with = "page")]
    all_pages: bool,

    /// Số bản ghi mỗi trang.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Ghi kết quả ra file thay vì stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Không đọc được file {:?}", args.input))?;
    let dataset = dataset_from_str(&data)
        .with_context(|| format!("Không dựng được dataset từ {:?}", args.input))?;

    let config = TimelineConfig {
        page_size: args.page_size,
    };
    config.validate()?;

    let mut renderer: TimelineRenderer<StringSurface> = TimelineRenderer::new(config);
    renderer.init(StringSurface::new());

    let mut pages = Vec::new();
    let mut window = renderer.update_view(Some(&dataset));
    if args.all_pages {
        pages.push(current_markup(&renderer));
        while window.is_some_and(|w| w.has_next()) {
            window = renderer.navigate(PageControl::Next, Some(&dataset));
            pages.push(current_markup(&renderer));
        }
    } else {
        for _ in 1..args.page {
            if !window.is_some_and(|w| w.has_next()) {
                log::warn!("Trang {} vượt quá số trang, dừng ở trang cuối", args.page);
                break;
            }
            window = renderer.navigate(PageControl::Next, Some(&dataset));
        }
        pages.push(current_markup(&renderer));
    }

    let html = pages.join("\n");
    match &args.output {
        Some(path) => std::fs::write(path, &html)
            .with_context(|| format!("Không ghi được file {path:?}"))?,
        None => println!("{html}"),
    }

    log::info!(
        "Đã render {} trang từ {} bản ghi",
        pages.len(),
        dataset.len()
    );

    Ok(())
}

fn current_markup(renderer: &TimelineRenderer<StringSurface>) -> String {
    renderer
        .surface()
        .map(|surface| surface.content().to_string())
        .unwrap_or_default()
}
