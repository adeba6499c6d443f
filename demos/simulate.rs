use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rand::Rng;
use windrose::config::{DirectionLabels, LayoutConfig};
use windrose::corner_info::CornerUnit;
use windrose::speed_range::{rolling_average, DynamicSpeedRange};
use windrose::{
    BarLocation, CornerInfo, CornersInfo, EntityState, FixedAdvance, SpeedRangeMode,
    SpeedRangeService, SpeedUnit, WindRose, WindRoseConfig, WindSpeedEntityConfig,
};

struct Reading {
    direction: f64,
    speed: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("windrose=debug").init();

    // Gust bar with buckets that widen once the average picks up
    let entity = WindSpeedEntityConfig::builder()
        .entity("sensor.gust")
        .name("Gust")
        .output_unit(SpeedUnit::Kph)
        .speed_range_mode(SpeedRangeMode::Dynamic(vec![
            DynamicSpeedRange { average_above: 0.0, step: 5.0, max: 30.0 },
            DynamicSpeedRange { average_above: 25.0, step: 10.0, max: 80.0 },
        ]))
        .build();

    let corners = CornersInfo {
        top_left: CornerInfo::builder()
            .show(true)
            .label("Direction")
            .input_unit(CornerUnit::Degrees)
            .output_unit(CornerUnit::Letters)
            .build(),
        top_right: CornerInfo::builder()
            .show(true)
            .label("Gust")
            .unit(" km/h")
            .input_unit(CornerUnit::Speed(SpeedUnit::Mps))
            .output_unit(CornerUnit::Speed(SpeedUnit::Kph))
            .precision(0)
            .build(),
        ..Default::default()
    };

    let rose = WindRose::new(WindRoseConfig {
        entities: vec![entity.clone()],
        bar_location: BarLocation::Right,
        direction_labels: DirectionLabels::default(),
        corners,
        layout: LayoutConfig::default(),
    });

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut rng = rand::rng();
        let mut speed: f64 = 3.0;
        for _ in 0..40 {
            speed = (speed + rng.random_range(-1.5..2.5)).clamp(0.0, 30.0);
            let reading = Reading {
                direction: rng.random_range(0.0..360.0),
                speed,
            };
            if sender.send(reading).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(50));
        }
    });

    let measure = FixedAdvance::default();
    let mut samples = Vec::new();
    let mut current_buckets = 0;
    let mut frame = rose.frame(&measure, &[None], &[])?;
    println!("initial viewBox=\"{}\"", frame.view_box);

    for reading in receiver {
        let kph = entity.to_output_speed(reading.speed).unwrap_or(reading.speed);
        samples.push(kph);
        let average = rolling_average(&samples[samples.len().saturating_sub(10)..]);

        let ranges = rose.speed_ranges(&[average]);
        if rose.has_dynamic_ranges() && ranges[0].len() != current_buckets {
            current_buckets = ranges[0].len();
            frame = rose.frame(&measure, &[average], &[])?;
            println!("relayout: {} buckets, viewBox=\"{}\"", current_buckets, frame.view_box);
        }

        frame.update_corners(&[
            EntityState::active(reading.direction),
            EntityState::active(reading.speed),
        ]);
        let bucket = SpeedRangeService::classify(&frame.ranges[0], kph)
            .map_or(-1, |range| range.index as i64);
        println!(
            "{:>6.1} km/h  avg {:>5.1}  bucket {:>2}  corners {}",
            kph,
            average.unwrap_or(0.0),
            bucket,
            frame.scene.len()
        );
    }
    Ok(())
}
