//! pptcli - resolve PresentationML packages to JSON, and basic .pptx
//! scaffolding utilities.

use ppt_rs::cli::{Command, CreateCommand, InfoCommand, Parser, ResolveCommand};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let args = &args[1..];

    match Parser::parse(args) {
        Ok(Command::Create(create_args)) => {
            match CreateCommand::execute(
                &create_args.output,
                create_args.title.as_deref(),
                create_args.slides,
                create_args.template.as_deref(),
            ) {
                Ok(_) => {
                    println!("Created presentation: {}", create_args.output);
                    println!("  Title: {}", create_args.title.as_deref().unwrap_or("Presentation"));
                    println!("  Slides: {}", create_args.slides);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Ok(Command::Info(info_args)) => {
            if let Err(e) = InfoCommand::execute(&info_args.file) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Ok(Command::Resolve(resolve_args)) => {
            if let Err(e) = ResolveCommand::execute(&resolve_args.input, resolve_args.output.as_deref()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Ok(Command::Help) => print_help(),
        Err(e) => {
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!("pptcli - PowerPoint (.pptx) tool");
    println!();
    println!("USAGE:");
    println!("  pptcli <command> [options]");
    println!();
    println!("COMMANDS:");
    println!("  create <file.pptx>       Create a new presentation");
    println!("  info <file.pptx>         Show presentation information");
    println!("  resolve <file.pptx>      Resolve a package into its JSON slide tree");
    println!("  help                     Show this help message");
    println!();
    println!("CREATE OPTIONS:");
    println!("  --title <text>           Set presentation title");
    println!("  --slides <count>         Number of slides to create (default: 1)");
    println!("  --template <file>        Use template file");
    println!();
    println!("RESOLVE OPTIONS:");
    println!("  -o, --output <file.json> Write output to a file instead of stdout");
    println!();
    println!("EXAMPLES:");
    println!("  pptcli create my.pptx --title 'My Presentation' --slides 5");
    println!("  pptcli info my.pptx");
    println!("  pptcli resolve deck.pptx -o deck.json");
}
