use anyhow::Context;
use mblbp::app::{run_evaluation, EvaluationConfig};
use mblbp::logger;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let input: PathBuf = args
        .next()
        .context("usage: dump_codes <image> [--window WxH] [--log LEVEL]")?
        .into();

    let mut cfg = EvaluationConfig {
        image: input,
        ..Default::default()
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--window" => {
                let v = args.next().context("expected WxH after --window")?;
                let (w, h) = v
                    .split_once('x')
                    .context("window must be given as WxH, e.g. 24x24")?;
                cfg.win_width = Some(w.parse().context("could not parse window width")?);
                cfg.win_height = Some(h.parse().context("could not parse window height")?);
            }
            "--log" => {
                cfg.log_level = Some(args.next().context("expected a level after --log")?);
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    logger::init_with_level(logger::parse_level(cfg.log_level.as_deref()));

    let started = Instant::now();
    let dump = run_evaluation(cfg)?;
    let ms = started.elapsed().as_secs_f64() * 1000.0;

    println!("image {}x{} pixels", dump.width, dump.height);
    println!(
        "window {}x{}: {} features in {:5.2} ms",
        dump.win_width, dump.win_height, dump.num_features, ms
    );

    Ok(())
}
