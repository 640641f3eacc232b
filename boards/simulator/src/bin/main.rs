#[macro_use]
extern crate log;

use env_logger::Env;
use std::io::Read;
use std::time::Duration;

use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use async_std::sync::Mutex;
use brick_control::config;
use brick_control::types::ControlInputs;
use simulator::{HostModel, Simulator};

static SIMULATOR: Mutex<Option<Simulator>> = Mutex::new(None);

#[get("/telemetry")]
async fn get_telemetry() -> impl Responder {
    web::Json(SIMULATOR.lock().await.as_ref().unwrap().get_telemetry())
}

#[post("/input")]
async fn update_input(input: web::Json<ControlInputs>) -> impl Responder {
    SIMULATOR.lock().await.as_mut().unwrap().update_input(*input);
    HttpResponse::Ok()
}

#[post("/pause")]
async fn pause(paused: web::Json<bool>) -> impl Responder {
    SIMULATOR.lock().await.as_mut().unwrap().pause(*paused);
    HttpResponse::Ok()
}

#[post("/step")]
async fn step(millis: web::Json<u64>) -> impl Responder {
    SIMULATOR.lock().await.as_mut().unwrap().step(*millis);
    HttpResponse::Ok()
}

#[post("/reopen")]
async fn reopen() -> impl Responder {
    SIMULATOR.lock().await.as_mut().unwrap().reopen();
    HttpResponse::Ok()
}

async fn run(interval: u64) {
    loop {
        async_std::task::sleep(Duration::from_millis(interval)).await;
        if let Some(simulator) = SIMULATOR.lock().await.as_mut() {
            simulator.step(interval);
        }
    }
}

fn parse<T: std::str::FromStr>(matches: &clap::ArgMatches, name: &str, default: &str) -> Result<T, String> {
    let value = matches.value_of(name).unwrap_or(default);
    value.parse::<T>().map_err(|_| format!("{} not a number: {}", name, value))
}

async fn init<'a>(matches: &'a clap::ArgMatches<'a>) -> Result<(), String> {
    let config_path = matches.value_of("config").unwrap_or("flight_model.cfg");
    let mut file = std::fs::File::open(config_path)
        .map_err(|e| format!("Read config file {} failed: {}", config_path, e))?;
    let mut buffer = String::new();
    file.read_to_string(&mut buffer).map_err(|_| "Unable to read config-file")?;
    let config = config::read_config(&buffer);
    let latitude: f64 = parse(matches, "latitude", "47.4490")?;
    let longitude: f64 = parse(matches, "longitude", "-122.3093")?;
    let elevation: f64 = parse(matches, "elevation", "433")?;
    info!("Starting at {:.4},{:.4} elevation {}ft", latitude, longitude, elevation);
    let host = HostModel::new(
        latitude.to_radians(),
        longitude.to_radians(),
        elevation,
        config.static_cg_height,
    );
    *SIMULATOR.lock().await = Some(Simulator::new(config, host));
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = clap::App::new("simulator")
        .version("0.1")
        .author("qiuchengxuan")
        .about("Flying brick direct controller simulator")
        .arg(clap::Arg::with_name("listen").short("l").help("Listen address").takes_value(true))
        .arg(clap::Arg::with_name("config").long("config").help("Flight model file").takes_value(true))
        .arg(clap::Arg::with_name("rate").long("rate").help("Ticks per second, 0 to step manually").takes_value(true))
        .arg(clap::Arg::with_name("latitude").long("latitude").help("Degrees").takes_value(true))
        .arg(clap::Arg::with_name("longitude").long("longitude").help("Degrees").takes_value(true))
        .arg(clap::Arg::with_name("elevation").long("elevation").help("Ground elevation, feet").takes_value(true))
        .get_matches();
    if let Some(error) = init(&matches).await.err() {
        println!("{}", error);
        return Ok(());
    }
    let rate: u64 = match parse(&matches, "rate", "30") {
        Ok(rate) => rate,
        Err(error) => {
            println!("{}", error);
            return Ok(());
        }
    };
    if rate > 0 {
        async_std::task::spawn(run((1000 / rate).max(1)));
    }
    let listen = matches.value_of("listen").unwrap_or("127.0.0.1:8080");
    info!("Start listening on {}", listen);
    let server = || {
        App::new()
            .service(get_telemetry)
            .service(update_input)
            .service(pause)
            .service(step)
            .service(reopen)
    };
    if listen.starts_with("/") {
        HttpServer::new(server).bind_uds(listen)?.run().await
    } else {
        HttpServer::new(server).bind(listen)?.run().await
    }
}
