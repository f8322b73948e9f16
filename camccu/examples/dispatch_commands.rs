//! Dispatch a few commands to a transport task
//!
//! Run with `RUST_LOG=camccu=debug` to see every packet built and sent.

use anyhow::Context;
use chrono::Local;
use tracing_subscriber::EnvFilter;

use camccu::{
    CameraControl, ChannelSink, ControlConfig, DispatchState, Integrity, Packet, RecordingFormatData,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let destination = std::env::var("CAMERA_ID")
        .ok()
        .map(|id| id.parse::<u8>())
        .transpose()
        .context("CAMERA_ID must be 0-255")?
        .unwrap_or(1);

    let (sink, mut rx) = ChannelSink::channel();
    let config = ControlConfig::new()
        .with_destination(destination)
        .with_integrity(Integrity::Checksum16);

    // Stands in for the BLE or serial writer
    let transport = tokio::spawn(async move {
        let mut count = 0usize;
        while let Some(bytes) = rx.recv().await {
            let packet = Packet::parse(&bytes, Integrity::Checksum16)?;
            println!("{:<40} {}", packet.parameter().to_string(), hex::encode(&bytes));
            count += 1;
        }
        anyhow::Ok(count)
    });

    let camera = CameraControl::with_config(sink, config);

    let results = [
        camera.write_iso(800),
        camera.write_shutter_angle(18000),
        camera.write_white_balance(5600, 0),
        camera.write_auto_white_balance(),
        camera.write_iris_fstop(2.8),
        camera.write_focus_normalised(0.5),
        camera.write_recording_format(&RecordingFormatData::new(24, 3840, 2160)),
        camera.write_system_clock(Local::now().naive_local()),
        camera.write_scene("12A"),
        // Rejected: five characters at most
        camera.write_scene("scene 12A"),
    ];

    drop(camera);
    let received = transport.await??;

    let rejected = results.iter().filter(|state| **state == DispatchState::Rejected).count();
    println!("sent {received}, rejected {rejected}");

    Ok(())
}
