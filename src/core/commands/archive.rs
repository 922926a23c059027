use clap::Parser;

use super::{parse_args, write_error, Command, CommandContext, CommandError};

#[derive(Debug, Parser)]
#[command(name = "zip", about = "Pack a folder into a ZIP archive")]
struct ZipArgs {
    /// Folder to archive
    folder: String,

    /// Archive to create; defaults to the folder's name, `.zip` is added if missing
    archive_name: Option<String>,
}

#[derive(Clone)]
pub struct ZipCommand;

impl Command for ZipCommand {
    fn about(&self) -> &'static str {
        "Pack a folder into a ZIP archive"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        let Some(args) = parse_args::<ZipArgs>("zip", args, ctx.out)? else {
            return Ok(());
        };

        let summary = ctx
            .engine
            .archive(&args.folder, args.archive_name.as_deref())?;
        writeln!(
            ctx.out,
            "{} ({} entries)",
            summary.path.display(),
            summary.entries
        )
        .map_err(write_error)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::commands::tests::{run, setup_engine};
    use crate::core::commands::CommandError;
    use std::fs;

    #[test]
    fn test_zip_default_name() {
        let (temp, mut engine) = setup_engine();
        let work = temp.path().join("work");
        fs::create_dir(work.join("data")).unwrap();
        fs::write(work.join("data/file.txt"), "test").unwrap();

        let output = run(&mut engine, &["zip", "data"], "").unwrap();

        assert!(work.join("data.zip").is_file());
        assert!(output.contains("(1 entries)"), "{output}");
    }

    #[test]
    fn test_zip_refuses_to_overwrite() {
        let (temp, mut engine) = setup_engine();
        let work = temp.path().join("work");
        fs::create_dir(work.join("data")).unwrap();
        fs::write(work.join("backup.zip"), "precious").unwrap();

        let result = run(&mut engine, &["zip", "data", "backup"], "");

        assert!(matches!(result, Err(CommandError::AlreadyExists(_))));
        assert_eq!(fs::read_to_string(work.join("backup.zip")).unwrap(), "precious");
    }

    #[test]
    fn test_zip_requires_folder() {
        let (temp, mut engine) = setup_engine();
        fs::write(temp.path().join("work/file.txt"), "test").unwrap();

        assert!(matches!(
            run(&mut engine, &["zip", "file.txt", "out.zip"], ""),
            Err(CommandError::NotADirectory(_))
        ));
        assert!(!temp.path().join("work/out.zip").exists());
    }
}
