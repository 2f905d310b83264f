use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use hermes_guidance::{
    ApiResponseGenerator, DescriptorConfig, InMemoryFacade, RouteResponse,
    annotation::RouteInstruction, raw_route::RawRoute,
};
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::file_utils::read_json_files;

#[derive(Args)]
pub struct DescribeArgs {
    /// A raw route JSON file, or a folder of them
    #[arg(short, long)]
    route: PathBuf,

    /// Node coordinates and street names the routes refer to
    #[arg(short, long)]
    names: PathBuf,

    /// Simplification resolution, 0 (coarsest) to 18
    #[arg(short, long, env = "HERMES_ZOOM_LEVEL", default_value_t = 18)]
    zoom: u8,

    #[arg(long)]
    no_instructions: bool,

    #[arg(long)]
    no_geometry: bool,

    /// Emit the geometry as [lat, lon] pairs instead of a polyline
    #[arg(long)]
    unencoded: bool,

    /// Output file, or folder when describing a folder of routes
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,

    /// Print the instructions as a table instead of JSON
    #[arg(long)]
    table: bool,
}

impl DescribeArgs {
    fn descriptor_config(&self) -> DescriptorConfig {
        DescriptorConfig {
            instructions: !self.no_instructions,
            geometry: !self.no_geometry,
            encode_geometry: !self.unencoded,
            ..DescriptorConfig::default()
        }
        .with_zoom_level(self.zoom)
    }
}

#[derive(Serialize)]
struct DescribedRoute<'a> {
    route: &'a Path,
    response: &'a RouteResponse,
}

pub fn run(args: DescribeArgs) -> Result<(), anyhow::Error> {
    let facade = load_facade(&args.names)?;
    let config = args.descriptor_config();
    debug!(zoom_level = config.zoom_level(), "descriptor config");

    if args.route.is_file() {
        let response = describe_file(&facade, &config, &args.route)?;
        if args.table {
            print_instructions(&args.route, &response);
            return Ok(());
        }

        return match &args.output {
            Some(output) => write_json(&response, File::create(output)?, args.pretty),
            None => write_json(&response, std::io::stdout().lock(), args.pretty),
        };
    }

    let paths = read_json_files(&args.route)?;
    info!("Describing {} routes from {:?}", paths.len(), args.route);

    let bar = ProgressBar::new(paths.len() as u64);
    let responses = paths
        .par_iter()
        .map(|path| {
            let response = describe_file(&facade, &config, path);
            bar.inc(1);
            response.map(|response| (path, response))
        })
        .collect::<Result<Vec<_>, anyhow::Error>>()?;
    bar.finish_and_clear();

    if let Some(output) = &args.output {
        std::fs::create_dir_all(output)?;
        for (path, response) in &responses {
            let relative = path.strip_prefix(&args.route).unwrap_or(path.as_path());
            let target = output.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            write_json(response, File::create(&target)?, args.pretty)?;
        }
        info!("Wrote {} responses to {:?}", responses.len(), output);
        return Ok(());
    }

    if args.table {
        for (path, response) in &responses {
            print_instructions(path, response);
        }
        return Ok(());
    }

    let described: Vec<DescribedRoute> = responses
        .iter()
        .map(|(path, response)| DescribedRoute {
            route: path.as_path(),
            response,
        })
        .collect();
    write_json(&described, std::io::stdout().lock(), args.pretty)
}

pub fn load_facade(path: &Path) -> Result<InMemoryFacade, anyhow::Error> {
    let file = File::open(path).with_context(|| format!("Cannot open {path:?}"))?;
    let facade: InMemoryFacade = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid routing data in {path:?}"))?;
    debug!(nodes = facade.node_count(), "loaded routing data");
    Ok(facade)
}

pub fn describe_file(
    facade: &InMemoryFacade,
    config: &DescriptorConfig,
    path: &Path,
) -> Result<RouteResponse, anyhow::Error> {
    let file = File::open(path).with_context(|| format!("Cannot open {path:?}"))?;
    let raw_route: RawRoute = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid raw route in {path:?}"))?;

    ApiResponseGenerator::new(facade)
        .describe_route(config, &raw_route)
        .with_context(|| format!("Failed to describe {path:?}"))
}

fn write_json<T: Serialize, W: Write>(
    value: &T,
    writer: W,
    pretty: bool,
) -> Result<(), anyhow::Error> {
    let mut writer = BufWriter::new(writer);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn print_instructions(path: &Path, response: &RouteResponse) {
    let summary = &response.route_summary;
    println!(
        "{}: {} to {}, {}m in {}s",
        path.display(),
        summary.start_point,
        summary.end_point,
        summary.total_distance,
        summary.total_time
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Instruction", "Street", "Distance", "Time", "Heading"]);
    for row in response.route_instructions.iter().flatten() {
        table.add_row(instruction_cells(row));
    }
    println!("{table}");
}

fn instruction_cells(row: &RouteInstruction) -> Vec<String> {
    vec![
        row.position.to_string(),
        row.instruction_code(),
        row.street_name.clone(),
        row.length_text.clone(),
        format!("{}s", row.duration),
        format!("{} ({}°)", row.post_turn_direction, row.post_turn_bearing),
    ]
}
