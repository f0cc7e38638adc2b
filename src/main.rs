use indicatif::ProgressBar;
use rt_core::probe::{self, ProbeConfig};

fn main() {
    env_logger::init();
    let config = ProbeConfig::default();
    let world = probe::cornell_box();
    let progress_bar = ProgressBar::new(config.image_height as u64);

    match probe::run(&world, &config, progress_bar) {
        Ok(report) => {
            log::info!("probe finished, coverage {:.3}", report.coverage());
            println!("{report}");
        }
        Err(err) => log::error!("probe failed: {err}"),
    }
}
