use anyhow::{bail, Context, Result};
use clap::{arg, command, value_parser, ArgMatches, Command};
use spacewm::utils;
use spacewm::FileStore;
use spacewm_core::config::ConfigStore;
use spacewm_core::models::dto::ArrangementState;
use spacewm_core::models::MAXIMUM;
use spacewm_core::{State, SubspaceId};

fn main() -> Result<()> {
    let matches = get_command().get_matches();

    let level = matches
        .get_one::<String>("log")
        .map_or("warn", String::as_str);
    let (subscriber, log_parse_err) = utils::log::parse_log_level(level);
    tracing::subscriber::set_global_default(subscriber)
        .context("ERROR: Couldn't setup global subscriber (logger)")?;
    if let Some(err) = log_parse_err {
        tracing::warn!("Error parsing log level: {err}");
    }

    let mut store = match matches.get_one::<String>("config") {
        Some(path) => FileStore::open(path),
        None => FileStore::open_default(),
    }
    .context("ERROR: Couldn't open the config file")?;

    let mut state = State::new();
    state.load(&store);

    let changed = match matches.subcommand() {
        Some(("set-count", args)) => {
            let count = *required::<u32>(args, "COUNT")?;
            if !(1..=MAXIMUM).contains(&count) {
                bail!("the number of desktops must be between 1 and {MAXIMUM}");
            }
            state.set_subspace_count(count);
            true
        }
        Some(("set-rows", args)) => {
            state.set_subspace_rows(*required::<u32>(args, "ROWS")?);
            true
        }
        Some(("rename", args)) => {
            let id = subspace_at(&state, *required::<u32>(args, "DESKTOP")?)?;
            state.rename_subspace(id, required::<String>(args, "NAME")?)
        }
        Some(("create", args)) => {
            let position = required::<u32>(args, "POSITION")?.saturating_sub(1);
            let name = args.get_one::<String>("NAME").map_or("", String::as_str);
            if state.create_subspace(position, name).is_none() {
                bail!("there are already {MAXIMUM} desktops");
            }
            true
        }
        Some(("remove", args)) => {
            let id = subspace_at(&state, *required::<u32>(args, "DESKTOP")?)?;
            if !state.remove_subspace(id) {
                bail!("the last desktop can not be removed");
            }
            true
        }
        Some(("list", args)) => {
            print_arrangement(&state, args.get_flag("json"))?;
            false
        }
        _ => {
            print_arrangement(&state, false)?;
            false
        }
    };

    if changed {
        state.subspaces.save(&mut store);
        store.sync().with_context(|| {
            format!("ERROR: Couldn't write {}", store.path().display())
        })?;
    }
    Ok(())
}

fn get_command() -> Command {
    command!("spacewm Desktops")
        .about("Inspects and edits the persisted virtual desktops")
        .help_template(utils::get_help_template())
        .args(&[
            arg!(-c --config <FILE> "Use this config file instead of the default one.")
                .required(false),
            arg!(-l --log <FILTER> "Log filter, for example 'debug' or 'spacewm_core=trace'.")
                .required(false),
        ])
        .subcommand(
            Command::new("list")
                .about("Print the desktops and windows (the default)")
                .arg(arg!(--json "Print the arrangement as json.")),
        )
        .subcommand(
            Command::new("set-count")
                .about("Change the number of desktops")
                .arg(arg!(<COUNT> "The new number of desktops.").value_parser(value_parser!(u32))),
        )
        .subcommand(
            Command::new("set-rows")
                .about("Change the number of rows in the desktop grid")
                .arg(arg!(<ROWS> "The new number of rows.").value_parser(value_parser!(u32))),
        )
        .subcommand(
            Command::new("rename")
                .about("Rename a desktop")
                .arg(arg!(<DESKTOP> "Ordinal of the desktop, starting at 1.").value_parser(value_parser!(u32)))
                .arg(arg!(<NAME> "The new name.")),
        )
        .subcommand(
            Command::new("create")
                .about("Insert a new desktop")
                .arg(arg!(<POSITION> "Ordinal the new desktop will get.").value_parser(value_parser!(u32)))
                .arg(arg!([NAME] "Name of the new desktop.")),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a desktop, moving its windows to a neighbour")
                .arg(arg!(<DESKTOP> "Ordinal of the desktop, starting at 1.").value_parser(value_parser!(u32))),
        )
}

fn required<'a, T: Clone + Send + Sync + 'static>(args: &'a ArgMatches, id: &str) -> Result<&'a T> {
    args.get_one::<T>(id)
        .with_context(|| format!("ERROR: Missing argument {id}"))
}

fn subspace_at(state: &State, x11_id: u32) -> Result<SubspaceId> {
    state
        .subspaces
        .subspace(x11_id)
        .map(|subspace| subspace.id)
        .with_context(|| format!("ERROR: There is no desktop {x11_id}"))
}

fn print_arrangement(state: &State, json: bool) -> Result<()> {
    let arrangement = ArrangementState::from(state);
    if json {
        println!("{}", serde_json::to_string_pretty(&arrangement)?);
        return Ok(());
    }
    println!(
        "{} desktops in {} rows, wrapping {}",
        arrangement.subspaces.len(),
        arrangement.rows,
        if arrangement.navigation_wrapping { "on" } else { "off" }
    );
    for subspace in &arrangement.subspaces {
        let marker = if subspace.current { '*' } else { ' ' };
        println!(
            "{marker} {:>2} {:<24} column {} row {}",
            subspace.x11_id,
            subspace.name,
            subspace.column + 1,
            subspace.row + 1
        );
    }
    Ok(())
}
