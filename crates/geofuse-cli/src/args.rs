use clap::{Parser, Subcommand};

/// CLI arguments for geofuse-cli
#[derive(Debug, Parser)]
#[command(
    name = "geofuse",
    version,
    about = "CLI for classifying, filtering and replaying the geofuse-core feature store"
)]
pub struct CliArgs {
    /// Directory holding the three source files (default: the data bundled
    /// with geofuse-core)
    #[arg(short = 'd', long = "data", global = true)]
    pub data: Option<String>,

    /// Display language for labels and bilingual matching (en or ar)
    #[arg(long = "lang", global = true, default_value = "en")]
    pub lang: String,

    /// Pull the datasets from a running dashboard API instead of files
    /// (base URL, e.g. http://127.0.0.1:5000)
    #[cfg(feature = "fetch")]
    #[arg(long = "fetch", global = true, value_name = "BASE_URL")]
    pub fetch_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show per-kind counts of the loaded feature store
    Stats,

    /// Print every filter widget's options for the active language
    Facets,

    /// Run one filter pass and print the matches
    Filter {
        /// Dataset gate (health_center, road, checkpoint, border_crossing)
        #[arg(long)]
        dataset: Option<String>,

        /// Free-text query across bilingual names and type labels
        #[arg(short, long)]
        query: Option<String>,

        /// Time floor, epoch seconds/millis or ISO-8601
        #[arg(long)]
        since: Option<String>,

        /// Drop features that carry no usable timestamp
        #[arg(long)]
        exclude_undated: bool,

        /// Health: facility type label
        #[arg(long)]
        facility_type: Option<String>,

        /// Health: single service label
        #[arg(long)]
        service: Option<String>,

        /// Health: urbanization label
        #[arg(long)]
        urbanization: Option<String>,

        /// Health: governorate label
        #[arg(long)]
        governorate: Option<String>,

        /// Road: highway class (exact)
        #[arg(long)]
        highway: Option<String>,

        /// Road: oneway flag (yes or no)
        #[arg(long)]
        oneway: Option<String>,

        /// Road: minimum lane count
        #[arg(long)]
        lanes_min: Option<String>,

        /// Road: maximum lane count
        #[arg(long)]
        lanes_max: Option<String>,

        /// Road: minimum speed limit
        #[arg(long)]
        speed_min: Option<String>,

        /// Road: maximum speed limit
        #[arg(long)]
        speed_max: Option<String>,

        /// Checkpoint: containing area
        #[arg(long)]
        checkpoint_country: Option<String>,

        /// Border: controlling country
        #[arg(long)]
        border_country: Option<String>,

        /// Border: crossing type
        #[arg(long)]
        border_type: Option<String>,

        /// Border: operational status
        #[arg(long)]
        border_status: Option<String>,

        /// Emit the matches as a GeoJSON FeatureCollection
        #[arg(long)]
        json: bool,
    },

    /// Replay a rising time floor from a start to now, reporting marker
    /// churn per tick
    Timeline {
        /// Number of ticks
        #[arg(long, default_value_t = 10)]
        steps: u32,

        /// Window start, epoch seconds/millis or ISO-8601 (default: the
        /// earliest feature timestamp)
        #[arg(long)]
        since: Option<String>,
    },
}
