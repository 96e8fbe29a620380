use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use meteo_core::{
    CellSelection, ClientConfig, ForecastModel, OpenMeteoClient, PrecipitationUnit,
    RequestParameters, TemperatureUnit, TimeFormat, WeatherVariable, WindSpeedUnit,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Open-Meteo forecast client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and host used for requests.
    Configure,

    /// Print the validated request URL without sending it.
    Url(RequestArgs),

    /// Fetch a forecast and summarize the flatbuffers response.
    Fetch(RequestArgs),
}

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Load base parameters from a TOML file; flags override it.
    #[arg(long)]
    request: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    elevation: Option<f64>,

    /// Comma-separated variables, e.g. temperature_2m,rain
    #[arg(long, value_delimiter = ',')]
    hourly: Vec<WeatherVariable>,

    #[arg(long, value_delimiter = ',')]
    daily: Vec<WeatherVariable>,

    #[arg(long = "minutely-15", value_delimiter = ',')]
    minutely_15: Vec<WeatherVariable>,

    #[arg(long, value_delimiter = ',')]
    current: Vec<WeatherVariable>,

    #[arg(long)]
    temperature_unit: Option<TemperatureUnit>,

    #[arg(long)]
    wind_speed_unit: Option<WindSpeedUnit>,

    #[arg(long)]
    precipitation_unit: Option<PrecipitationUnit>,

    #[arg(long)]
    timeformat: Option<TimeFormat>,

    #[arg(long)]
    timezone: Option<String>,

    #[arg(long)]
    past_days: Option<i32>,

    #[arg(long)]
    forecast_days: Option<i32>,

    #[arg(long)]
    forecast_hours: Option<i32>,

    #[arg(long = "forecast-minutely-15")]
    forecast_minutely_15: Option<i32>,

    #[arg(long)]
    past_hours: Option<i32>,

    #[arg(long = "past-minutely-15")]
    past_minutely_15: Option<i32>,

    /// First day, YYYY-MM-DD (local time).
    #[arg(long)]
    start_date: Option<NaiveDate>,

    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// First hour, YYYY-MM-DDTHH:MM (local time).
    #[arg(long, value_parser = parse_local_datetime)]
    start_hour: Option<DateTime<Utc>>,

    #[arg(long, value_parser = parse_local_datetime)]
    end_hour: Option<DateTime<Utc>>,

    /// First 15-minute step, YYYY-MM-DDTHH:MM (local time).
    #[arg(long = "start-minutely-15", value_parser = parse_local_datetime)]
    start_minutely_15: Option<DateTime<Utc>>,

    #[arg(long = "end-minutely-15", value_parser = parse_local_datetime)]
    end_minutely_15: Option<DateTime<Utc>>,

    #[arg(long, value_delimiter = ',')]
    models: Vec<ForecastModel>,

    #[arg(long)]
    cell_selection: Option<CellSelection>,
}

impl RequestArgs {
    fn into_params(self) -> Result<RequestParameters> {
        let mut params = match &self.request {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read request file: {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse request file: {}", path.display()))?
            }
            None => {
                let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
                    return Err(anyhow!("--lat and --lon are required without --request"));
                };
                RequestParameters::new(lat, lon)
            }
        };

        if let Some(lat) = self.lat {
            params.latitude = lat;
        }
        if let Some(lon) = self.lon {
            params.longitude = lon;
        }
        params.elevation = self.elevation.or(params.elevation);

        params.hourly.extend(self.hourly);
        params.daily.extend(self.daily);
        params.minutely_15.extend(self.minutely_15);
        params.current.extend(self.current);
        params.models.extend(self.models);

        params.temperature_unit = self.temperature_unit.or(params.temperature_unit);
        params.wind_speed_unit = self.wind_speed_unit.or(params.wind_speed_unit);
        params.precipitation_unit = self.precipitation_unit.or(params.precipitation_unit);
        params.timeformat = self.timeformat.or(params.timeformat);
        params.cell_selection = self.cell_selection.or(params.cell_selection);
        if self.timezone.is_some() {
            params.timezone = self.timezone;
        }

        params.past_days = self.past_days.unwrap_or(params.past_days);
        params.forecast_days = self.forecast_days.unwrap_or(params.forecast_days);
        params.forecast_hours = self.forecast_hours.unwrap_or(params.forecast_hours);
        params.forecast_minutely_15 = self
            .forecast_minutely_15
            .unwrap_or(params.forecast_minutely_15);
        params.past_hours = self.past_hours.unwrap_or(params.past_hours);
        params.past_minutely_15 = self.past_minutely_15.unwrap_or(params.past_minutely_15);

        if let Some(date) = self.start_date {
            params.start_date = Some(local_midnight(date)?);
        }
        if let Some(date) = self.end_date {
            params.end_date = Some(local_midnight(date)?);
        }
        params.start_hour = self.start_hour.or(params.start_hour);
        params.end_hour = self.end_hour.or(params.end_hour);
        params.start_minutely_15 = self.start_minutely_15.or(params.start_minutely_15);
        params.end_minutely_15 = self.end_minutely_15.or(params.end_minutely_15);

        Ok(params)
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Url(args) => {
                let config = ClientConfig::load()?;
                println!("{}", request_url(&config, args)?);
                Ok(())
            }
            Command::Fetch(args) => {
                let config = ClientConfig::load()?;
                let client = OpenMeteoClient::new(&config)?;
                let mut params = args.into_params()?;

                let response = client
                    .fetch_weather(&mut params)
                    .await
                    .context("Forecast request failed")?;

                println!("HTTP {}", response.status());
                for (i, frame) in response.frames().enumerate() {
                    println!("location {i}: {} bytes", frame.len());
                }
                println!("total: {} bytes", response.as_bytes().len());
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = ClientConfig::load()?;

    let api_key = inquire::Password::new("API key (leave empty for the free tier):")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    config.base_url = inquire::Text::new("API host:")
        .with_default(&config.base_url)
        .prompt()
        .context("Failed to read API host")?;

    config.save()?;
    println!(
        "Configuration saved to {}",
        ClientConfig::config_file_path()?.display()
    );
    Ok(())
}

/// Validated request URL; dropped variables are logged by validation.
fn request_url(config: &ClientConfig, args: RequestArgs) -> Result<String> {
    let client = OpenMeteoClient::new(config)?;
    let mut params = args.into_params()?;
    Ok(client.forecast_url(&mut params))
}

fn local_midnight(date: NaiveDate) -> Result<DateTime<Utc>> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid date: {date}"))?;
    to_utc(midnight)
}

fn parse_local_datetime(value: &str) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM: {e}"))?;
    to_utc(naive).map_err(|e| e.to_string())
}

fn to_utc(local: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("{local} does not exist in the local time zone"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn parse(args: &[&str]) -> RequestArgs {
        let mut argv = vec!["meteo", "url"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).expect("arguments should parse").command {
            Command::Url(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flags_build_parameters() {
        let params = parse(&[
            "--lat",
            "52.52",
            "--lon",
            "-13.41",
            "--hourly",
            "temperature_2m,rain",
            "--temperature-unit",
            "fahrenheit",
            "--models",
            "icon_d2,best_match",
            "--past-days",
            "3",
        ])
        .into_params()
        .unwrap();

        assert_eq!(params.latitude, 52.52);
        assert_eq!(params.longitude, -13.41);
        assert_eq!(
            params.hourly,
            vec![WeatherVariable::Temperature2m, WeatherVariable::Rain]
        );
        assert_eq!(params.temperature_unit, Some(TemperatureUnit::Fahrenheit));
        assert_eq!(
            params.models,
            vec![ForecastModel::IconD2, ForecastModel::BestMatch]
        );
        assert_eq!(params.past_days, 3);
    }

    #[test]
    fn unknown_variable_is_a_parse_error() {
        let err = Cli::try_parse_from(["meteo", "url", "--lat", "1", "--lon", "2", "--hourly", "fog"])
            .unwrap_err();
        assert!(err.to_string().contains("fog"));
    }

    #[test]
    fn coordinates_are_required_without_request_file() {
        let err = parse(&["--lat", "1"]).into_params().unwrap_err();
        assert!(err.to_string().contains("--lat and --lon are required"));
    }

    #[test]
    fn request_file_is_overridden_by_flags() {
        let path = std::env::temp_dir().join(format!("meteo-request-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "latitude = 10.0\nlongitude = 20.0\ndaily = [\"sunrise\"]\nforecast_days = 5\n",
        )
        .unwrap();

        let params = parse(&[
            "--request",
            path.to_str().unwrap(),
            "--lon",
            "21.5",
            "--daily",
            "sunset",
        ])
        .into_params()
        .unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(params.latitude, 10.0);
        assert_eq!(params.longitude, 21.5);
        assert_eq!(
            params.daily,
            vec![WeatherVariable::Sunrise, WeatherVariable::Sunset]
        );
        assert_eq!(params.forecast_days, 5);
    }

    #[test]
    fn sub_daily_counts_and_bounds_have_flags() {
        let params = parse(&[
            "--lat",
            "1",
            "--lon",
            "2",
            "--forecast-minutely-15",
            "8",
            "--past-hours",
            "6",
            "--past-minutely-15",
            "4",
            "--start-minutely-15",
            "2024-03-01T06:00",
            "--end-minutely-15",
            "2024-03-01T09:15",
        ])
        .into_params()
        .unwrap();

        assert_eq!(params.forecast_minutely_15, 8);
        assert_eq!(params.past_hours, 6);
        assert_eq!(params.past_minutely_15, 4);
        assert_eq!(
            params.start_minutely_15,
            Some(parse_local_datetime("2024-03-01T06:00").unwrap())
        );
        assert_eq!(
            params.end_minutely_15,
            Some(parse_local_datetime("2024-03-01T09:15").unwrap())
        );
    }

    #[test]
    fn dropped_variable_is_reported_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let _guard = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("warn"))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish()
            .set_default();

        let args = parse(&["--lat", "1", "--lon", "2", "--current", "temperature_2m,sunset"]);
        let url = request_url(&ClientConfig::default(), args).unwrap();
        assert!(url.contains("&current=temperature_2m"));
        assert!(!url.contains("sunset"));

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.matches("sunset").count(), 1, "logs: {logs}");
    }

    #[test]
    fn hour_bounds_accept_minutes_and_seconds() {
        assert!(parse_local_datetime("2024-03-01T06:00").is_ok());
        assert!(parse_local_datetime("2024-03-01T06:00:30").is_ok());
        assert!(parse_local_datetime("2024-03-01").is_err());
    }
}
