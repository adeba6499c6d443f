use std::env;
use std::fs;
use std::process;

use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use windrose::forecast::parse_forecast_str;
use windrose::{
    CornerPosition, DrawCommand, EntityState, FixedAdvance, FontMeasure, TextMeasure, WindRose,
};

const SAMPLE_CONFIG: &str = r#"
windspeed_entities:
  - entity: sensor.wind_speed
    name: Speed
    speed_range_beaufort: true
  - entity: sensor.wind_gust
    name: Gust
    dynamic_speed_ranges:
      - average_above: 0
        step: 2
        max: 10
      - average_above: 10
        step: 5
        max: 30
corner_info:
  top_left:
    show: true
    label: Direction
    input_unit: degrees
    output_unit: letters
  bottom_right:
    show: true
    label: Gust
    unit: " km/h"
    input_unit: mps
    output_unit: kph
    precision: 1
"#;

struct Args {
    config: Option<String>,
    font: Option<String>,
    forecast: Option<String>,
    averages: Vec<Option<f64>>,
    corners: Vec<EntityState>,
    simulate: bool,
}

fn usage() -> ! {
    eprintln!(
        "usage: windrose [--config card.yaml] [--font font.ttf] [--average v[,v...]] \
         [--corner top_left=VALUE ...] [--simulate] [--forecast forecast.json]"
    );
    process::exit(2)
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        font: None,
        forecast: None,
        averages: Vec::new(),
        corners: vec![EntityState::inactive(); CornerPosition::ALL.len()],
        simulate: false,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(args.next().unwrap_or_else(|| usage())),
            "--font" => parsed.font = Some(args.next().unwrap_or_else(|| usage())),
            "--forecast" => parsed.forecast = Some(args.next().unwrap_or_else(|| usage())),
            "--simulate" => parsed.simulate = true,
            "--average" => {
                let values = args.next().unwrap_or_else(|| usage());
                parsed.averages = values.split(',').map(|v| v.trim().parse::<f64>().ok()).collect();
            }
            "--corner" => {
                let value = args.next().unwrap_or_else(|| usage());
                let Some((name, state)) = value.split_once('=') else { usage() };
                let Some(position) = corner_position(name) else { usage() };
                parsed.corners[position.index()] = EntityState::active(state);
            }
            _ => usage(),
        }
    }
    parsed
}

fn corner_position(name: &str) -> Option<CornerPosition> {
    match name {
        "top_left" => Some(CornerPosition::TopLeft),
        "top_right" => Some(CornerPosition::TopRight),
        "bottom_left" => Some(CornerPosition::BottomLeft),
        "bottom_right" => Some(CornerPosition::BottomRight),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = parse_args();

    if let Some(path) = &args.forecast {
        for point in parse_forecast_str(&fs::read_to_string(path)?)? {
            println!("{}  {:>6.1}°  {:>5.1}", point.datetime, point.direction, point.speed);
        }
        return Ok(());
    }

    let yaml = match &args.config {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE_CONFIG.to_string(),
    };
    let rose = WindRose::from_yaml(&yaml)?;

    let measure: Box<dyn TextMeasure> = match &args.font {
        Some(path) => Box::new(FontMeasure::from_bytes(fs::read(path)?)?),
        None => Box::new(FixedAdvance::default()),
    };

    if args.simulate {
        let mut rng = rand::rng();
        args.averages = (0..rose.config().entities.len())
            .map(|_| Some(rng.random_range(0.0..25.0)))
            .collect();
        args.corners = vec![
            EntityState::active(rng.random_range(0.0..360.0)),
            EntityState::active(rng.random_range(0.0..100.0)),
            EntityState::active(rng.random_range(0.0..100.0)),
            EntityState::active(rng.random_range(0.0..30.0)),
        ];
    }

    let frame = rose.frame(measure.as_ref(), &args.averages, &args.corners)?;
    info!(entities = rose.config().entities.len(), "layout ready");

    println!("viewBox=\"{}\"", frame.view_box);
    let dims = frame.dimensions.as_ref();
    for (index, entity) in rose.config().entities.iter().enumerate() {
        println!(
            "bar {index} {:<12} x={:.1} y={:.1} w={:.1} h={:.1} buckets={}",
            entity.name,
            dims.bar_start_x(index),
            dims.bar_start_y(index),
            dims.bar_width(index),
            dims.bar_height(index),
            frame.ranges[index].len()
        );
    }
    for command in frame.scene.commands() {
        if let DrawCommand::Text { coordinate, text, attributes } = command {
            println!("text {:<24} ({:.1}, {:.1}) {:?}", attributes.class, coordinate.x, coordinate.y, text);
        }
    }
    Ok(())
}
