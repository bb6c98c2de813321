use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use foundation::Coordinate;
use geocoding::{GeocoderBackend, GeocoderConfig};
use route_index::{
    DEFAULT_MARKER_SPACING_M, MarkerSpacing, find_nearest_by_distance, place_markers,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Distance markers and profile lookups for route geometries"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place distance markers along a route and print them as GeoJSON
    Markers {
        /// Route GeoJSON file (LineString, Feature or FeatureCollection)
        #[arg(long, conflicts_with = "polyline", required_unless_present = "polyline")]
        route: Option<PathBuf>,

        /// Encoded polyline route shape
        #[arg(long)]
        polyline: Option<String>,

        /// Encoded polyline precision (5 or 6)
        #[arg(long, default_value_t = 6)]
        precision: u8,

        /// Distance between markers in meters
        #[arg(long, default_value_t = DEFAULT_MARKER_SPACING_M, allow_negative_numbers = true)]
        interval: f64,

        #[arg(long)]
        pretty: bool,
    },

    /// Print the profile position closest to a cumulative distance
    Nearest {
        /// Elevation profile GeoJSON FeatureCollection
        #[arg(long)]
        profile: PathBuf,

        /// Cumulative distance in meters; omit for an inactive cursor
        #[arg(long, allow_negative_numbers = true)]
        distance: Option<f64>,
    },

    /// Normalize a saved geocoder response into the common result shape
    Geocode {
        /// Raw response body from the geocoding service
        #[arg(long)]
        response: PathBuf,

        /// Query point of a reverse search: LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        reverse: Option<String>,

        /// Geocoder endpoint (default: $GEOCODER_URL)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Markers {
            route,
            polyline,
            precision,
            interval,
            pretty,
        } => cmd_markers(
            route.as_deref(),
            polyline.as_deref(),
            precision,
            interval,
            pretty,
        )?,
        Command::Nearest { profile, distance } => cmd_nearest(&profile, distance)?,
        Command::Geocode {
            response,
            reverse,
            endpoint,
        } => cmd_geocode(&response, reverse.as_deref(), endpoint)?,
    }

    Ok(())
}

fn cmd_markers(
    route: Option<&Path>,
    polyline: Option<&str>,
    precision: u8,
    interval: f64,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let spacing = MarkerSpacing::new(interval)?;

    let coords = match (route, polyline) {
        (Some(path), _) => {
            let payload = read_text(path)?;
            formats::route_from_geojson_str(&payload)?
        }
        (None, Some(encoded)) => {
            let precision = formats::PolylinePrecision::from_digits(precision)
                .ok_or_else(|| format!("unsupported polyline precision: {precision}"))?;
            formats::decode_polyline(encoded.trim(), precision)?
        }
        (None, None) => return Err("markers requires --route or --polyline".into()),
    };

    let markers = place_markers(&coords, spacing);
    info!(
        points = coords.len(),
        markers = markers.len(),
        length_m = route_index::route_length_m(&coords),
        "route indexed"
    );

    let out = if pretty {
        formats::markers_to_geojson_string_pretty(&markers)?
    } else {
        formats::markers_to_geojson_string(&markers)?
    };
    println!("{out}");
    Ok(())
}

fn cmd_nearest(profile: &Path, distance: Option<f64>) -> Result<(), Box<dyn std::error::Error>> {
    let payload = read_text(profile)?;
    let features = formats::profile_from_geojson_str(&payload)?;
    let nearest = find_nearest_by_distance(distance, &features);
    info!(features = features.len(), found = nearest.is_some(), "profile lookup");
    println!("{}", serde_json::to_string(&nearest)?);
    Ok(())
}

fn cmd_geocode(
    response: &Path,
    reverse: Option<&str>,
    endpoint: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match endpoint {
        Some(e) => GeocoderConfig::from_endpoint(Some(e)),
        None => GeocoderConfig::from_env(),
    };
    let backend = GeocoderBackend::from_config(&config);

    let body = read_text(response)?;
    let results = match reverse {
        Some(q) => backend.normalize_reverse(&body, parse_lat_lon(q)?)?,
        None => backend.normalize_forward(&body)?,
    };
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))
}

fn parse_lat_lon(s: &str) -> Result<Coordinate, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude {lat:?}: {e}"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude {lon:?}: {e}"))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("coordinate out of range: {lat},{lon}"));
    }
    Ok(Coordinate::new(lat, lon))
}
