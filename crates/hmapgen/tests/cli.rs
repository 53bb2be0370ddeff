//! End-to-end tests: settings resolution, sampling and PNG output.

use clap::Parser;
use hmapgen::{
    build_source, generate_heightmap, Cli, HmapgenError, Options, ProviderKind, Response,
    KEY_ENV_VAR,
};
use hmapgen_core::{Bound, ElevationSource, HeightmapError, NoProgress, Point, SourceError};
use serial_test::serial;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Server};

/// 100 m north of 45.005°N, 0 m south of it.
struct Ramp {
    calls: AtomicUsize,
    fail: bool,
}

impl Ramp {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

impl ElevationSource for Ramp {
    fn name(&self) -> &str {
        "ramp"
    }

    fn max_points_per_request(&self) -> usize {
        3
    }

    fn elevations(&self, points: &[Point]) -> Result<Vec<f64>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err("service unavailable".into());
        }
        Ok(points
            .iter()
            .map(|p| if p.lat > 45.005 { 100.0 } else { 0.0 })
            .collect())
    }
}

fn temp_png(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hmapgen-{}-{}.png", name, std::process::id()))
}

fn options(file: PathBuf) -> Options {
    Options {
        service: ProviderKind::Ign,
        key: "TESTKEY".to_string(),
        precision: 550.0,
        file,
        timeout: Duration::from_secs(5),
        base_url: None,
    }
}

#[test]
fn test_generate_writes_png() {
    let path = temp_png("ramp");
    let source = Ramp::new();
    let response = generate_heightmap(
        Bound::new(5.0, 45.0, 5.02, 45.01),
        &options(path.clone()),
        &source,
        &mut NoProgress,
    )
    .unwrap();

    assert_eq!(
        response,
        Response {
            filename: path.clone(),
            height_offset: 100,
        }
    );
    // 2x2 grid, limit 3: one call of 1 point then one of 3
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);

    let image = image::open(&path).unwrap().into_luma16();
    std::fs::remove_file(&path).ok();
    assert_eq!(image.dimensions(), (2, 2));
    assert_eq!(image.get_pixel(0, 0).0[0], u16::MAX);
    assert_eq!(image.get_pixel(1, 0).0[0], u16::MAX);
    assert_eq!(image.get_pixel(0, 1).0[0], 0);
    assert_eq!(image.get_pixel(1, 1).0[0], 0);
}

#[test]
fn test_response_json() {
    let response = Response {
        filename: PathBuf::from("./output.png"),
        height_offset: 1234,
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "filename": "./output.png", "height_offset": 1234 })
    );
}

#[test]
fn test_provider_failure_writes_nothing() {
    let path = temp_png("failure");
    std::fs::remove_file(&path).ok();
    let source = Ramp::failing();

    let result = generate_heightmap(
        Bound::new(5.0, 45.0, 5.02, 45.01),
        &options(path.clone()),
        &source,
        &mut NoProgress,
    );

    assert!(matches!(
        result,
        Err(HmapgenError::Heightmap(HeightmapError::Provider { chunk: 0, .. }))
    ));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert!(!path.exists());
}

#[test]
fn test_invalid_bound_is_rejected_before_sampling() {
    let path = temp_png("inverted");
    let source = Ramp::new();

    let result = generate_heightmap(
        Bound::new(5.02, 45.0, 5.0, 45.01),
        &options(path.clone()),
        &source,
        &mut NoProgress,
    );

    assert!(matches!(
        result,
        Err(HmapgenError::Heightmap(HeightmapError::InvalidBound(_)))
    ));
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert!(!path.exists());
}

#[test]
fn test_build_source_selects_service() {
    let mut opts = options(temp_png("unused"));
    let ign = build_source(&opts).unwrap();
    assert_eq!(ign.name(), "ign");
    assert_eq!(ign.max_points_per_request(), 50);

    opts.service = ProviderKind::Bing;
    let bing = build_source(&opts).unwrap();
    assert_eq!(bing.name(), "bing");
    assert_eq!(bing.max_points_per_request(), 100);

    opts.key = String::new();
    assert!(matches!(
        build_source(&opts),
        Err(HmapgenError::Provider(_))
    ));
}

#[test]
fn test_ign_over_http() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let base = format!("http://{}", server.server_addr());
    thread::spawn(move || {
        for request in server.incoming_requests().take(1) {
            let body = serde_json::json!({
                "elevations": [
                    { "lon": 5.0, "lat": 45.0, "z": -99999.0, "acc": 2.5 },
                    { "lon": 5.02, "lat": 45.0, "z": 40.0, "acc": 2.5 },
                    { "lon": 5.0, "lat": 45.01, "z": 80.0, "acc": 2.5 },
                    { "lon": 5.02, "lat": 45.01, "z": 120.0, "acc": 2.5 }
                ]
            });
            let header = Header::from_bytes("Content-Type", "application/json").unwrap();
            let response = tiny_http::Response::from_string(body.to_string()).with_header(header);
            let _ = request.respond(response);
        }
    });

    let path = temp_png("ign");
    let mut opts = options(path.clone());
    opts.base_url = Some(base);
    let source = build_source(&opts).unwrap();

    let response = generate_heightmap(
        Bound::new(5.0, 45.0, 5.02, 45.01),
        &opts,
        &source,
        &mut NoProgress,
    )
    .unwrap();
    assert_eq!(response.height_offset, 120);

    let image = image::open(&path).unwrap().into_luma16();
    std::fs::remove_file(&path).ok();
    // Unknown height at the south-west corner is drawn as 0
    assert_eq!(image.get_pixel(0, 1).0[0], 0);
    assert_eq!(image.get_pixel(1, 1).0[0], 21845);
    assert_eq!(image.get_pixel(0, 0).0[0], 43690);
    assert_eq!(image.get_pixel(1, 0).0[0], 65535);
}

#[test]
#[serial]
fn test_key_from_environment() {
    std::env::set_var(KEY_ENV_VAR, "ENVKEY");
    let cli = Cli::try_parse_from(["hmapgen", "45.0", "5.0", "45.01", "5.02"]).unwrap();
    let options = cli.options();
    std::env::remove_var(KEY_ENV_VAR);

    assert_eq!(options.unwrap().key, "ENVKEY");
}

#[test]
#[serial]
fn test_missing_key_without_environment() {
    std::env::remove_var(KEY_ENV_VAR);
    let cli = Cli::try_parse_from(["hmapgen", "45.0", "5.0", "45.01", "5.02"]).unwrap();
    assert!(matches!(cli.options(), Err(HmapgenError::Config(_))));
}

#[test]
#[serial]
fn test_config_file() {
    std::env::remove_var(KEY_ENV_VAR);
    let path = std::env::temp_dir().join(format!("hmapgen-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "service: bing\nkey: FILEKEY\nprecision: 30\n").unwrap();

    let cli = Cli::try_parse_from([
        "hmapgen",
        "45.0",
        "5.0",
        "45.01",
        "5.02",
        "--config",
        path.to_str().unwrap(),
    ])
    .unwrap();
    let options = cli.options();
    std::fs::remove_file(&path).ok();

    let options = options.unwrap();
    assert_eq!(options.service, ProviderKind::Bing);
    assert_eq!(options.key, "FILEKEY");
    assert_eq!(options.precision, 30.0);
}
