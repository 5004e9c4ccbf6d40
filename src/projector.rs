use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::image;
use crate::png;
use crate::tensor::DenseArray;

pub const PROJECTOR_CONFIG: &str = "projector_config.pbtxt";
pub const TENSORS_FILE: &str = "tensors.tsv";
pub const METADATA_FILE: &str = "metadata.tsv";
pub const SPRITE_FILE: &str = "sprite.png";

pub fn write_embedding(
    logdir: &Path,
    tag: &str,
    matrix: &DenseArray,
    labels: &[String],
    label_images: Option<(&DenseArray, &str)>,
    step: Option<i64>,
) -> io::Result<()> {
    let step = step.unwrap_or(0);
    let subdir = format!("{:05}/{}", step, tag);
    let save_dir = logdir.join(&subdir);
    fs::create_dir_all(&save_dir)?;

    write_tensors(&save_dir.join(TENSORS_FILE), matrix)?;
    if !labels.is_empty() {
        write_metadata(&save_dir.join(METADATA_FILE), labels)?;
    }
    let sprite = match label_images {
        Some((images, dataformats)) => Some(write_sprite(
            &save_dir.join(SPRITE_FILE),
            images,
            dataformats,
        )?),
        None => None,
    };

    let mut entry = String::from("embeddings {\n");
    entry.push_str(&format!("tensor_name: {:?}\n", format!("{}:{:05}", tag, step)));
    entry.push_str(&format!("tensor_path: {:?}\n", format!("{}/{}", subdir, TENSORS_FILE)));
    if !labels.is_empty() {
        let metadata_path = format!("{}/{}", subdir, METADATA_FILE);
        entry.push_str(&format!("metadata_path: {:?}\n", metadata_path));
    }
    if let Some((height, width)) = sprite {
        entry.push_str("sprite {\n");
        let image_path = format!("{}/{}", subdir, SPRITE_FILE);
        entry.push_str(&format!("image_path: {:?}\n", image_path));
        entry.push_str(&format!("single_image_dim: {}\n", height));
        entry.push_str(&format!("single_image_dim: {}\n", width));
        entry.push_str("}\n");
    }
    entry.push_str("}\n");

    let mut config = OpenOptions::new()
        .create(true)
        .append(true)
        .open(logdir.join(PROJECTOR_CONFIG))?;
    config.write_all(entry.as_bytes())?;
    tracing::debug!(tag, step, dir = %save_dir.display(), "wrote embedding");
    Ok(())
}

fn write_tensors(path: &Path, matrix: &DenseArray) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for row in matrix.rows() {
        let mut first = true;
        for value in row {
            if !first {
                out.write_all(b"\t")?;
            }
            first = false;
            write!(out, "{}", value)?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// One label per line; embedded line breaks and tabs would shift rows, so they become spaces.
fn write_metadata(path: &Path, labels: &[String]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for label in labels {
        let label = label.replace(['\n', '\r', '\t'], " ");
        writeln!(out, "{}", label)?;
    }
    out.flush()
}

/// Tiles the label images into a square sprite sheet. Returns the size of a single image.
fn write_sprite(
    path: &Path,
    images: &DenseArray,
    dataformats: &str,
) -> io::Result<(usize, usize)> {
    let count = images.shape().first().copied().unwrap_or(0);
    let side = (count as f64).sqrt().ceil().max(1.0) as usize;
    let pixels = image::to_pixels(images, dataformats, Some(side), side)?;
    fs::write(path, png::encode(&pixels)?)?;
    Ok((pixels.height / side, pixels.width / side))
}
