//! Demo CLI: evaluates a method + request target against a small built-in
//! route table (the classic items/users/models/files tutorial routes) and
//! prints either the bound parameter map or the structured rejection.
//!
//! ```bash
//! paramgate-demo /items/3
//! paramgate-demo "/items?skip=0&limit=10"
//! paramgate-demo --dump-routes
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use http::Method;
use paramgate::request::QueryMap;
use paramgate::router::Router;
use paramgate::spec::{ParameterSpec, RouteDef, SpecError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paramgate-demo")]
#[command(about = "Evaluate a request against the built-in demo route table", long_about = None)]
struct Cli {
    /// Request target, e.g. "/items/3?skip=0&limit=10"
    #[arg(default_value = "/items/3")]
    target: String,

    /// HTTP method
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Print the routing table and exit
    #[arg(long, default_value_t = false)]
    dump_routes: bool,
}

/// The demo route table: path parameters with numeric bounds, query
/// parameters with string validations, an enumerated path value, a static
/// segment shadowing a capture, and a greedy path capture.
fn demo_routes() -> Result<Router, SpecError> {
    let mut router = Router::new();

    router.add(RouteDef::new(
        Method::GET,
        "/items/{item_id}",
        "read_item",
        vec![
            ParameterSpec::path("item_id")
                .integer()
                .ge(0)
                .le(1000)
                .title("The ID of the item to get")
                .finish()?,
            ParameterSpec::query("q")
                .string()
                .min_length(3)
                .max_length(50)
                .alias("item-query")
                .optional()
                .finish()?,
            ParameterSpec::query("short").boolean().default_value(false).finish()?,
            ParameterSpec::query("size").float().gt(0.0).lt(10.5).optional().finish()?,
        ],
    )?)?;

    router.add(RouteDef::new(
        Method::GET,
        "/items",
        "read_items",
        vec![
            ParameterSpec::query("q")
                .string()
                .min_length(3)
                .max_length(50)
                .optional()
                .description("Query string for the items to search")
                .finish()?,
            ParameterSpec::query("skip").integer().ge(0).default_value(0).finish()?,
            ParameterSpec::query("limit").integer().ge(0).default_value(10).finish()?,
            ParameterSpec::query("tags").string_list().optional().finish()?,
            ParameterSpec::query("hidden_query").string().optional().hidden().finish()?,
            ParameterSpec::query("legacy")
                .string()
                .optional()
                .deprecated()
                .finish()?,
        ],
    )?)?;

    router.add(RouteDef::new(
        Method::GET,
        "/users/me",
        "read_current_user",
        Vec::new(),
    )?)?;

    router.add(RouteDef::new(
        Method::GET,
        "/users/{user_id}",
        "read_user",
        vec![ParameterSpec::path("user_id").string().finish()?],
    )?)?;

    router.add(RouteDef::new(
        Method::GET,
        "/users/{user_id}/items/{item_id}",
        "read_user_item",
        vec![
            ParameterSpec::path("user_id").integer().finish()?,
            ParameterSpec::path("item_id").string().finish()?,
            ParameterSpec::query("q").string().optional().finish()?,
            ParameterSpec::query("short").boolean().default_value(false).finish()?,
        ],
    )?)?;

    router.add(RouteDef::new(
        Method::GET,
        "/models/{model_name}",
        "get_model",
        vec![ParameterSpec::path("model_name")
            .one_of(["alexnet", "resnet", "lenet"])
            .finish()?],
    )?)?;

    router.add(RouteDef::new(
        Method::GET,
        "/files/{file_path:path}",
        "read_file",
        vec![ParameterSpec::path("file_path").string().finish()?],
    )?)?;

    Ok(router)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let router = demo_routes().context("failed to build the demo route table")?;

    if cli.dump_routes {
        router.dump_routes();
        return Ok(());
    }

    let method: Method = cli
        .method
        .to_uppercase()
        .parse()
        .map_err(|_| anyhow!("unsupported HTTP method `{}`", cli.method))?;

    let (path, query) = QueryMap::split_target(&cli.target);
    let Some(matched) = router.route(method.clone(), path) else {
        bail!("no route matches {method} {path}");
    };

    println!("handler: {}", matched.route.name);
    match matched.bind(&query) {
        Ok(params) => {
            println!("{}", serde_json::to_string_pretty(&params.to_json())?);
        }
        Err(rejection) => {
            eprintln!("{}", serde_json::to_string_pretty(&rejection.to_body())?);
            std::process::exit(1);
        }
    }

    Ok(())
}
