use clap::{
    Parser,
    Subcommand,
};
use medac::{
    platform::Builder as PlatformBuilder,
    Platform,
};
use medcore::{
    ac::{
        user::User,
        Action,
        Resource,
        Role,
        Subject,
    },
    platform::ConnectorOption,
};
use meddb::Backend;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, value_name = "MEDAC_DB_URL", env = "MEDAC_DB_URL")]
    medac_db_url: String,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(arg_required_else_help = true)]
    User {
        #[command(subcommand)]
        cmd: UserCmd,
    },
    #[command(arg_required_else_help = true)]
    Permission {
        #[command(subcommand)]
        cmd: PermissionCmd,
    },
    /// Reports whether the user may perform the action on the resource
    #[command(arg_required_else_help = true)]
    Enforce {
        name: String,
        #[arg(value_enum)]
        resource: Resource,
        #[arg(value_enum)]
        action: Action,
    },
}

#[derive(Debug, Subcommand)]
enum UserCmd {
    #[command(arg_required_else_help = true)]
    Create {
        name: String,
        #[arg(value_enum)]
        role: Role,
    },
    #[command(arg_required_else_help = true)]
    Status {
        name: String,
    },
}

#[derive(Debug, Subcommand)]
enum PermissionCmd {
    /// Shows the stored permissions of the secretary
    #[command(arg_required_else_help = true)]
    Show {
        name: String,
    },
    /// Sets a single permission, cascading through the action hierarchy
    #[command(arg_required_else_help = true)]
    Set {
        name: String,
        #[arg(value_enum)]
        resource: Resource,
        #[arg(value_enum)]
        action: Action,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Restores the default permissions of the secretary
    #[command(arg_required_else_help = true)]
    Reset {
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("medac")
        .module("meddb")
        .module("meddb_sqlite")
        .module("medrbac")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let platform = PlatformBuilder::new()
        .boxed_ac_platform(
            Backend::ac(
                ConnectorOption::from(args.medac_db_url)
                    .auto_create_db(true)
            )
                .await
                .map_err(anyhow::Error::from_boxed)?
        )
        .build()?;

    match args.command {
        Commands::User { cmd } => {
            parse_user(&platform, cmd).await?;
        },
        Commands::Permission { cmd } => {
            parse_permission(&platform, cmd).await?;
        },
        Commands::Enforce { name, resource, action } => {
            let user = get_user(&platform, &name).await?;
            let subject = platform.subject_for_user(user).await?;
            let result = platform.enforce(&subject, resource, action).await?;
            println!(
                "{name} {} {action} {resource}",
                if result { "may" } else { "may not" },
            );
        },
    }

    Ok(())
}

// the command line is operated by the platform administrator
fn operator() -> Subject {
    Subject::from_role(Role::Admin)
}

async fn get_user(
    platform: &Platform,
    name: &str,
) -> anyhow::Result<User> {
    platform.get_user_by_name(name).await?
        .ok_or_else(|| anyhow::anyhow!("no such user {name:?}"))
}

async fn parse_user(
    platform: &Platform,
    arg: UserCmd,
) -> anyhow::Result<()> {
    match arg {
        UserCmd::Create { name, role } => {
            let user = platform.create_user(&name, role).await?;
            println!("user {:?} created with id {} as {}", user.name, user.id, user.role);
        },
        UserCmd::Status { name } => {
            let user = get_user(platform, &name).await?;
            println!("user {:?} (id {}) is a {}", user.name, user.id, user.role);
            if platform.is_bypass(user.role) {
                println!("this role bypasses all permission checks");
            }
        },
    }
    Ok(())
}

async fn parse_permission(
    platform: &Platform,
    arg: PermissionCmd,
) -> anyhow::Result<()> {
    let operator = operator();
    match arg {
        PermissionCmd::Show { name } => {
            let user = get_user(platform, &name).await?;
            match platform.get_permissions(user.id).await? {
                Some(matrix) => println!("{}", serde_json::to_string_pretty(&matrix)?),
                None => println!("no permissions stored for {name:?}"),
            }
        },
        PermissionCmd::Set { name, resource, action, value } => {
            let user = get_user(platform, &name).await?;
            let matrix = platform.update_permission(
                &operator,
                user.id,
                resource,
                action,
                value,
            ).await?;
            println!("{}", serde_json::to_string_pretty(&matrix)?);
        },
        PermissionCmd::Reset { name } => {
            let user = get_user(platform, &name).await?;
            let matrix = platform.reset_permissions(&operator, user.id).await?;
            println!("{}", serde_json::to_string_pretty(&matrix)?);
        },
    }
    Ok(())
}
