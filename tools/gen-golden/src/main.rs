// tools/gen-golden: evaluate the full catalog on test images and store codes.
use anyhow::Context;
use image::imageops::{resize, FilterType};
use image::ImageReader;
use mblbp_core::{MblbpParams, MblbpRepresentation};
use std::{fs::File, io::Write, path::Path};

fn write_golden(path_out: &Path, w: u32, h: u32, codes: &[u8]) -> std::io::Result<()> {
    let mut f = File::create(path_out)?;
    f.write_all(&w.to_le_bytes())?;
    f.write_all(&h.to_le_bytes())?;
    f.write_all(&(codes.len() as u32).to_le_bytes())?;
    f.write_all(codes)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let root = Path::new("crates/mblbp-core/testdata");
    let imgs = std::fs::read_dir(root.join("images"))
        .with_context(|| format!("listing {}", root.join("images").display()))?;
    std::fs::create_dir_all(root.join("golden"))?;

    let params = MblbpParams::default();
    let repr = MblbpRepresentation::new(params)?;

    for e in imgs {
        let p = e?.path();
        if p.extension().and_then(|s| s.to_str()) != Some("png") {
            continue;
        }
        let img = ImageReader::open(&p)?.decode()?.to_luma8();
        let img = if img.dimensions() == (params.win_width, params.win_height) {
            img
        } else {
            resize(&img, params.win_width, params.win_height, FilterType::Triangle)
        };

        let ii = repr.preprocess(
            img.as_raw(),
            params.win_width as usize,
            params.win_height as usize,
        )?;
        let codes = repr.evaluate_all(&ii)?;

        let name = p
            .file_stem()
            .context("image path without file name")?
            .to_string_lossy();
        let out = root.join("golden").join(format!("{name}.bin"));
        write_golden(&out, params.win_width, params.win_height, &codes)?;
        println!("golden: {:?} -> {:?} ({} codes)", p, out, codes.len());
    }
    Ok(())
}
