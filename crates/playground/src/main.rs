use std::env;

use fence::{calculator, codec, editor, snap, FenceConfig};
use model::{
    fence::GeoJsonDocument,
    live::{MarkerUpdate, RawLiveTrackSample},
    location::LatLng,
};
use tokio::sync::mpsc;
use tracking::{tracker::LiveTracker, TrackingConfig};

#[tokio::main]
async fn main() {
    env_logger::init();

    if env::args().nth(1).as_deref() == Some("schema") {
        let schema = schemars::schema_for!(GeoJsonDocument);
        println!("{}", serde_json::to_string_pretty(&schema).unwrap());
        return;
    }

    let fence_config = FenceConfig::from_env();
    let tracking_config = TrackingConfig::from_env();

    // stored area fences
    let circle = codec::parse_geo_json(
        r#"{"type":"Circle","radius":500,"coordinates":[12.97,77.64]}"#,
    )
    .expect("circle fence should decode");
    let display = calculator::display_fence(&circle, None).unwrap();
    println!("circle: {:?}", display);

    let center = codec::parse_geo_position(
        r#"{"type":"Point","coordinates":[12.9716,77.5946]}"#,
    )
    .unwrap();
    let polygon = editor::to_editable_polygon(&center, 300.0, &fence_config);
    let polygon_json = codec::to_geo_json_string(&polygon).unwrap();
    println!("editable polygon: {}", polygon_json);
    let stored = codec::parse_geo_json(&polygon_json).unwrap();
    println!(
        "polygon: {:?}",
        calculator::display_fence(&stored, Some(&center)).unwrap()
    );

    // route fence
    let drawn = vec![
        LatLng::new(12.90, 77.60),
        LatLng::new(12.91, 77.61),
        LatLng::new(12.915, 77.625),
    ];
    let route = snap::resolve_snapped(drawn, None);
    if let Some(warning) = &route.fallback {
        println!("warning: {}", warning);
    }
    match editor::route_fence(&route.points, 0.02, &fence_config) {
        Ok(_) => println!("20 m route fence accepted"),
        Err(why) => println!("warning: {}", why),
    }
    let corridor = editor::route_fence(&route.points, 0.05, &fence_config).unwrap();
    println!(
        "route fence: {} bytes of geoJson",
        codec::to_geo_json_string(&corridor).unwrap().len()
    );

    // live tracking
    let (sender, mut updates) = mpsc::unbounded_channel::<MarkerUpdate>();
    let tracker = LiveTracker::spawn(sender, tracking_config);
    let now = chrono::Utc::now().timestamp();
    let raw = (0..5)
        .map(|i| RawLiveTrackSample {
            lat: Some(12.90 + i as f64 * 0.002),
            lng: Some(77.60 + i as f64 * 0.002),
            timestamp: Some(now - 5 + i),
            speed: Some(30.0 + i as f64),
            halt_status: Some(false),
            idling_status: Some(i == 2),
            is_no_gps: Some(false),
            is_overspeed: Some(i == 4),
        })
        .collect::<Vec<_>>();
    tracker.load_raw(raw).await.unwrap();
    for _ in 0..5 {
        let Some(update) = updates.recv().await else {
            break;
        };
        println!(
            "marker -> ({:.4}, {:.4}) {:?} over {} ms",
            update.position.lat,
            update.position.lng,
            update.attributes.status,
            update.transition_duration_ms
        );
    }
    tracker.shutdown().await;
}
