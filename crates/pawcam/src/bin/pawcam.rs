use pawcam::{ClassificationResult, FacingMode, FrameSource, Pipeline, PipelineConfig, StillImage};
use std::env;
use std::path::PathBuf;

const USAGE: &str = "usage: pawcam <model.onnx> (--image <path> | --camera) \
[--facing user|environment] [--config <file.json>] [--log-dir <dir>] [--json]";

enum Mode {
    Image(PathBuf),
    Camera,
}

struct Args {
    model: PathBuf,
    mode: Mode,
    facing: FacingMode,
    config: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    json: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut model = None;
    let mut mode = None;
    let mut facing = FacingMode::default();
    let mut config = None;
    let mut log_dir = None;
    let mut json = false;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("{flag} needs a value\n{USAGE}"))
        };
        match arg.as_str() {
            "--image" => mode = Some(Mode::Image(value("--image")?.into())),
            "--camera" => mode = Some(Mode::Camera),
            "--facing" => {
                facing = value("--facing")?
                    .parse()
                    .map_err(|e| format!("{e}\n{USAGE}"))?
            }
            "--config" => config = Some(value("--config")?.into()),
            "--log-dir" => log_dir = Some(value("--log-dir")?.into()),
            "--json" => json = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}\n{USAGE}")),
            path if model.is_none() => model = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {extra}\n{USAGE}")),
        }
    }

    Ok(Args {
        model: model.ok_or_else(|| format!("missing model path\n{USAGE}"))?,
        mode: mode.ok_or_else(|| format!("choose --image <path> or --camera\n{USAGE}"))?,
        facing,
        config,
        log_dir,
        json,
    })
}

fn report(result: &ClassificationResult, json: bool) {
    if json {
        match serde_json::to_string(result) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    } else {
        println!("{result}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args(env::args().skip(1))?;

    match &args.log_dir {
        Some(dir) => pawcam_base::init_file_logger(dir)?,
        None => pawcam_base::init_stdout_logger(),
    }

    let config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    let mut pipeline = Pipeline::create(args.model.clone(), config.clone()).await?;

    match &args.mode {
        Mode::Image(path) => {
            let mut still = StillImage::open(path).await?;
            let result = pipeline.classify(&mut still).await;
            still.release();
            report(&result?, args.json);
        }
        Mode::Camera => run_camera(&mut pipeline, &config, &args).await?,
    }

    Ok(())
}

#[cfg(feature = "v4l2")]
async fn run_camera(
    pipeline: &mut Pipeline,
    config: &PipelineConfig,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    use pawcam::{ActiveSource, Constraints};
    use pawcam_camera::V4l2Provider;
    use tokio::io::{AsyncBufReadExt, BufReader};

    let mut active = ActiveSource::new(V4l2Provider::new(config.camera().clone()));
    if let Err(e) = active.select(Constraints::facing(args.facing)).await {
        eprintln!("Error: {e}");
    }

    println!("Enter: classify, f: flip camera, q: quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" | "c" => match active.source_mut() {
                Some(camera) => match pipeline.classify(camera).await {
                    Ok(result) => report(&result, args.json),
                    Err(e) => eprintln!("Error: {e}"),
                },
                None => eprintln!("No camera open, press f to try the other one"),
            },
            "f" => match active.toggle_facing().await {
                Ok(_) => println!("Switched to {} camera", active.constraints().facing),
                Err(e) => eprintln!("Error: {e}"),
            },
            "q" => break,
            other => eprintln!("Unknown command {other:?}"),
        }
    }

    active.release();
    Ok(())
}

#[cfg(not(feature = "v4l2"))]
async fn run_camera(
    _pipeline: &mut Pipeline,
    _config: &PipelineConfig,
    _args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    Err("camera mode needs pawcam built with the v4l2 feature".into())
}
