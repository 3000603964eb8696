use orgtree::view::{
    FitTransform, TidyTreeLayout, TreeLayout, ViewConfig, ViewError, ViewStateController, Viewport,
    extents,
};
use orgtree::{BuildReport, NodeId, NodeIndex, SearchField};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Build(orgtree::Error),
    View(ViewError),
    Json(serde_json::Error),
    UnknownRoot(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Build(err) => write!(f, "{err}"),
            CliError::View(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::UnknownRoot(id) => write!(f, "No employee with id `{id}`"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<orgtree::Error> for CliError {
    fn from(value: orgtree::Error) -> Self {
        Self::Build(value)
    }
}

impl From<ViewError> for CliError {
    fn from(value: ViewError) -> Self {
        Self::View(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Tree,
    Search,
    Fit,
    Report,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    flat: bool,
    root: Option<String>,
    query: Option<String>,
    field: SearchField,
    viewport_width: f64,
    viewport_height: f64,
    config: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeOut<'a> {
    roots: Vec<Value>,
    report: &'a BuildReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlatTreeOut<'a> {
    roots: Vec<&'a str>,
    nodes: Vec<Value>,
    report: &'a BuildReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit<'a> {
    id: &'a str,
    name: &'a str,
    manager_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FitOut<'a> {
    root: &'a str,
    visible_nodes: usize,
    viewport: Viewport,
    transform: FitTransform,
}

fn usage() -> &'static str {
    "orgtree-cli\n\
\n\
USAGE:\n\
  orgtree-cli [tree] [--flat] [--pretty] [--root <id>] [<path>|-]\n\
  orgtree-cli search [--field id|name|managerId] [--pretty] <query> [<path>|-]\n\
  orgtree-cli fit [--root <id>] [--viewport-width <w>] [--viewport-height <h>] [--config <path>] [--pretty] [<path>|-]\n\
  orgtree-cli report [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON array of flat employee objects (EMPLOYEENUMBER, SUPERVISORPARTYID, FIRSTNAME\n\
    or their aliases; header case does not matter).\n\
  - tree prints every root candidate's subtree unless --root narrows it. Nesting is capped;\n\
    --flat prints one entry per node with child ids instead, at any depth.\n\
  - search takes the query as its first positional argument (or --query <text>).\n\
  - Warnings (unresolved managers, duplicates, cycles) go to stderr; set RUST_LOG to adjust.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Tree,
        viewport_width: 1280.0,
        viewport_height: 720.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "tree" => args.command = Command::Tree,
            "search" => args.command = Command::Search,
            "fit" => args.command = Command::Fit,
            "report" => args.command = Command::Report,
            "--pretty" => args.pretty = true,
            "--flat" => args.flat = true,
            "--root" => {
                let Some(root) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.root = Some(root.clone());
            }
            "--query" => {
                let Some(query) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.query = Some(query.clone());
            }
            "--field" => {
                let Some(field) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.field = field
                    .parse::<SearchField>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--viewport-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--viewport-height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            query if matches!(args.command, Command::Search) && args.query.is_none() => {
                args.query = Some(query.to_string());
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Search) && args.query.is_none() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn resolve_root(index: &NodeIndex, root: Option<&str>) -> Result<Option<NodeId>, CliError> {
    match root {
        None => Ok(None),
        Some(id) => index
            .lookup(id)
            .map(Some)
            .ok_or_else(|| CliError::UnknownRoot(id.to_string())),
    }
}

fn load_config(path: Option<&str>) -> Result<ViewConfig, CliError> {
    match path {
        None => Ok(ViewConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(ViewConfig::from_json_str(&text)?)
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let records = orgtree::records_from_json(&text)?;
    let (index, report) = orgtree::build(&records)?;
    tracing::debug!(
        records = records.len(),
        nodes = index.len(),
        roots = index.roots().len(),
        "input loaded"
    );

    match args.command {
        Command::Report => write_json(&report, args.pretty),
        Command::Tree => {
            let roots = match resolve_root(&index, args.root.as_deref())? {
                Some(root) => vec![root],
                None => index.roots().to_vec(),
            };
            if args.flat {
                return write_json(
                    &FlatTreeOut {
                        roots: roots.iter().map(|r| index[*r].id()).collect(),
                        nodes: roots
                            .iter()
                            .flat_map(|r| index.to_flat_values(*r))
                            .collect(),
                        report: &report,
                    },
                    args.pretty,
                );
            }
            let roots = roots
                .into_iter()
                .map(|r| index.to_tree_value(r))
                .collect::<orgtree::Result<Vec<_>>>()?;
            write_json(
                &TreeOut {
                    roots,
                    report: &report,
                },
                args.pretty,
            )
        }
        Command::Search => {
            let query = args.query.as_deref().unwrap_or_default();
            let hits: Vec<SearchHit<'_>> = index
                .search_nodes(query, args.field)
                .into_iter()
                .map(|n| SearchHit {
                    id: n.id(),
                    name: n.name(),
                    manager_id: n.manager_id(),
                })
                .collect();
            write_json(&hits, args.pretty)
        }
        Command::Fit => {
            let config = load_config(args.config.as_deref())?;
            let mut view = ViewStateController::new(config);
            view.load(&index)?;
            if let Some(root) = resolve_root(&index, args.root.as_deref())? {
                view.select_root(root)?;
            }
            let Some(root) = view.current_root() else {
                return Err(CliError::Usage(usage()));
            };

            let placed = TidyTreeLayout::default().layout(&index, root);
            let viewport = Viewport::new(args.viewport_width, args.viewport_height);
            let transform = view.fit(&extents(&placed), viewport);
            write_json(
                &FitOut {
                    root: index[root].id(),
                    visible_nodes: placed.len(),
                    viewport,
                    transform,
                },
                args.pretty,
            )
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Build(orgtree::Error::EmptyInput { .. })) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
