use rand::prelude::*;
use tracing_subscriber::EnvFilter;

use tensorboard_summary as tb;
use tb::layers::Dense;
use tb::{ImageDataFormat, SummaryWriter, Tensor};

fn main() -> tb::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let logdir = std::env::args_os().nth(1).unwrap_or_else(|| {
        eprintln!("fatal: specify LOGDIR as first argument");
        std::process::exit(1);
    });
    let mut writer = SummaryWriter::with_flush_secs(&logdir, 5)?;

    writer.add_json_text(
        "hparams",
        &serde_json::json!({"learning_rate": 0.01, "layers": [64, 10]}),
        Some(0),
        None,
    )?;

    const STEPS: i64 = 50;
    for step in 0..STEPS {
        // get your values from somewhere... here, we just make them up
        let loss = 10.0 / (step + 1) as f32;
        writer.add_scalar("loss", loss, Some(step), None)?;
        writer.add_scalars(
            "accuracy",
            [("train", 1.0 - loss / 20.0), ("eval", 1.0 - loss / 15.0)],
            Some(step),
            None,
        )?;

        let sigma = 10.0 / (step as f64 + 1.0).sqrt();
        let layer = Dense {
            weight: normal(&[64, 10], step as f64, sigma),
            bias: normal(&[10], 3.0, 10.0),
        };
        writer.add_histograms("dense", &layer, Some(step))?;

        if step % 10 == 0 {
            let t = step as f32 / STEPS as f32;
            let image = Tensor::from_fn([32, 32, 3], |idx| match idx[2] {
                0 => idx[1] as f32 / 31.0,
                1 => idx[0] as f32 / 31.0,
                _ => t,
            });
            writer.add_image("gradient", &image, ImageDataFormat::ChannelsLast, Some(step), None)?;
        }
    }

    let points = normal(&[100, 8], 0.0, 1.0);
    let labels: Vec<String> = (0..100).map(|i| format!("point {}", i % 4)).collect();
    writer.add_embedding(tb::DEFAULT_EMBEDDING_TAG, &points, &labels, Some(STEPS))?;

    writer.close()?;
    println!("wrote {} steps to {}", STEPS, logdir.to_string_lossy());
    Ok(())
}

fn normal(shape: &[usize], mu: f64, sigma: f64) -> Tensor<f64> {
    let mut rng = rand::thread_rng();
    let dist = rand_distr::Normal::new(mu, sigma).unwrap();
    Tensor::from_fn(shape, |_| dist.sample(&mut rng))
}
