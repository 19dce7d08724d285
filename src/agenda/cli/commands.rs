use super::print::{
    print_contact_cards, print_contact_table, print_messages, render_json,
};
use super::prompt::{confirm, prompt_fields};
use super::setup::{Cli, Commands, FieldArgs};
use agenda::api::AgendaApi;
use agenda::commands::{CmdMessage, CmdResult};
use agenda::config::AgendaConfig;
use agenda::error::{AgendaError, Result};
use agenda::init::initialize;
use agenda::model::{Contact, ContactId};
use agenda::store::fs::FileStore;
use agenda::store::ContactStore;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: AgendaApi<FileStore>,
    config: AgendaConfig,
    data_dir: PathBuf,
    config_path: PathBuf,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;
    let startup = ctx.api.take_startup_messages();
    print_messages(&startup, ctx.use_color);

    let outcome = match cli.command {
        Some(Commands::Add { fields }) => handle_add(&mut ctx, fields),
        Some(Commands::List { json }) => handle_list(&ctx, json),
        Some(Commands::Search { terms, json }) => handle_search(&ctx, terms, json),
        Some(Commands::View { ids }) => handle_view(&ctx, ids),
        Some(Commands::Edit { id, fields }) => handle_edit(&mut ctx, id, fields),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, id, yes),
        Some(Commands::Import { paths }) => handle_import(&mut ctx, paths),
        Some(Commands::Export { output }) => handle_export(&ctx, output),
        Some(Commands::Config) => handle_config(&ctx),
        None => handle_list(&ctx, false),
    };

    // Changes that could not be saved earlier get one last attempt.
    let flushed = ctx.api.flush();
    outcome?;
    flushed
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "agenda=debug" } else { "agenda=error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.file.clone())?;
    let config_path = ctx.config_path();
    debug!(store = %ctx.api.store().describe(), "context ready");

    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
        data_dir: ctx.data_dir,
        config_path,
        use_color: io::stdout().is_terminal(),
    })
}

fn handle_add(ctx: &mut AppContext, fields: FieldArgs) -> Result<()> {
    let fields = if fields.is_empty() {
        prompt_fields(None, &mut io::stdin().lock(), &mut io::stdout())?
    } else {
        fields.into_fields()
    };

    if fields.is_blank() {
        print_messages(&[CmdMessage::info("Nothing to add.")], ctx.use_color);
        return Ok(());
    }

    let result = ctx.api.create_contact(&fields)?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_list(ctx: &AppContext, json: bool) -> Result<()> {
    let result = ctx.api.list_contacts();
    print_listing(ctx, &result, json)
}

fn handle_search(ctx: &AppContext, terms: Vec<String>, json: bool) -> Result<()> {
    let result = ctx.api.search_contacts(&terms.join(" "));
    print_listing(ctx, &result, json)
}

fn print_listing(ctx: &AppContext, result: &CmdResult, json: bool) -> Result<()> {
    if json {
        println!("{}", render_json(&result.listed_contacts)?);
        return Ok(());
    }
    print_contact_table(&result.listed_contacts, ctx.use_color);
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_view(ctx: &AppContext, ids: Vec<ContactId>) -> Result<()> {
    let result = ctx.api.view_contacts(&ids)?;
    print_contact_cards(&result.listed_contacts, ctx.use_color);
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: ContactId, fields: FieldArgs) -> Result<()> {
    let patch = if fields.is_empty() {
        let current = lookup(ctx, id)?;
        prompt_fields(Some(&current), &mut io::stdin().lock(), &mut io::stdout())?
    } else {
        fields.into_fields()
    };

    let result = ctx.api.update_contact(id, &patch)?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: ContactId, yes: bool) -> Result<()> {
    if !yes {
        let contact = lookup(ctx, id)?;
        let question = format!("Delete contact {} ({})?", id, contact.display_name());
        if !confirm(&question, &mut io::stdin().lock(), &mut io::stdout())? {
            print_messages(&[CmdMessage::info("Aborted.")], ctx.use_color);
            return Ok(());
        }
    }

    let result = ctx.api.delete_contact(id)?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, paths: Vec<PathBuf>) -> Result<()> {
    let extensions = ctx.config.import_extensions.clone();
    let result = ctx.api.import_cards(&paths, &extensions)?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_export(ctx: &AppContext, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_contacts()?;
    let document = result.document.unwrap_or_default();

    match output {
        Some(path) => {
            std::fs::write(&path, document)?;
            print_messages(&result.messages, ctx.use_color);
            print_messages(
                &[CmdMessage::info(format!("Written to {}", path.display()))],
                ctx.use_color,
            );
        }
        // stdout carries only the document so it can be piped.
        None => println!("{}", document),
    }
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let config = &ctx.config;
    let search_fields: Vec<&str> = ctx
        .api
        .directory()
        .search_fields()
        .iter()
        .map(|f| f.name())
        .collect();

    println!("data_dir          = {}", ctx.data_dir.display());
    println!("config_file       = {}", ctx.config_path.display());
    println!("store_file        = {}", ctx.api.store().describe());
    println!("search_fields     = {}", search_fields.join(", "));
    println!("require_name      = {}", config.require_name);
    println!("import_extensions = {}", config.import_extensions.join(", "));
    Ok(())
}

fn lookup(ctx: &AppContext, id: ContactId) -> Result<Contact> {
    let result = ctx.api.view_contacts(&[id])?;
    result
        .listed_contacts
        .into_iter()
        .next()
        .ok_or(AgendaError::ContactNotFound(id))
}
