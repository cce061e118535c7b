use std::{convert::Infallible, path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};

use crate::{
    bibtex::{Delimiter, FieldOrder, FormatOptions, Indent},
    config::{
        DEFAULT_ADDRESS, DEFAULT_PORT, DictionarySources, ServerConfig, default_output,
        expand_home,
    },
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Listen for the browser connector and append saved items to a bibliography
    Serve {
        /// Address to bind
        #[arg(long, env = "BIBHOOK_ADDRESS", default_value = DEFAULT_ADDRESS)]
        address: String,
        /// Port to listen to
        #[arg(long, env = "BIBHOOK_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Bibliography file to append to [default: ~/.bib/EB.bib]
        #[arg(short, long, env = "BIBHOOK_OUTPUT", value_name = "FILE")]
        output: Option<PathBuf>,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Convert a saved-items JSON document to BibTeX on stdout
    Convert {
        /// JSON file with an `items` list, or `-` for stdin
        #[arg(value_name = "INPUT", default_value = "-")]
        input: Input,
        #[command(flatten)]
        format: FormatArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FormatArgs {
    /// Delimit field values with quotes instead of braces
    #[arg(long)]
    pub quotes: bool,
    /// Indent fields with a tab
    #[arg(long)]
    pub tab_indent: bool,
    /// Keep fields in capture order instead of sorting them
    #[arg(long)]
    pub unsorted: bool,
    /// Base spelling dictionary (plain word list or hunspell .dic); repeatable
    #[arg(long, value_name = "FILE")]
    pub dictionary: Vec<PathBuf>,
    /// Personal word list of extra known spellings; repeatable
    #[arg(long, value_name = "FILE")]
    pub words: Vec<PathBuf>,
}

impl FormatArgs {
    pub fn options(&self) -> FormatOptions {
        FormatOptions {
            delimiter: if self.quotes { Delimiter::Quotes } else { Delimiter::Braces },
            indent: if self.tab_indent { Indent::Tab } else { Indent::Space },
            order: if self.unsorted { FieldOrder::Insertion } else { FieldOrder::Sorted },
        }
    }

    pub fn dictionary_sources(&self) -> DictionarySources {
        DictionarySources {
            words: self.dictionary.iter().map(|p| expand_home(p)).collect(),
            personal: self.words.iter().map(|p| expand_home(p)).collect(),
        }
    }
}

pub fn server_config(address: String, port: u16, output: Option<PathBuf>) -> ServerConfig {
    ServerConfig {
        address,
        port,
        output: output.map(|p| expand_home(&p)).unwrap_or_else(default_output),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where `convert` reads its JSON document from.
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl FromStr for Input {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Input::Stdin)
        } else {
            Ok(Input::File(expand_home(&PathBuf::from(s))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_reads_stdin() {
        assert_eq!(Input::from_str("-"), Ok(Input::Stdin));
        assert_eq!(
            Input::from_str("/tmp/items.json"),
            Ok(Input::File(PathBuf::from("/tmp/items.json")))
        );
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["bibhook", "serve"]).expect("parse");
        let Command::Serve { address, port, output, format } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(address, "localhost");
        assert_eq!(port, 23119);
        assert_eq!(format.options(), FormatOptions::default());
        assert_eq!(server_config(address, port, output).port, 23119);
    }

    #[test]
    fn format_flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "bibhook",
            "convert",
            "items.json",
            "--quotes",
            "--tab-indent",
            "--unsorted",
            "--words",
            "extra.txt",
        ])
        .expect("parse");
        let Command::Convert { input, format } = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(input, Input::File(PathBuf::from("items.json")));
        assert_eq!(
            format.options(),
            FormatOptions {
                delimiter: Delimiter::Quotes,
                indent: Indent::Tab,
                order: FieldOrder::Insertion,
            }
        );
        assert_eq!(format.dictionary_sources().personal, [PathBuf::from("extra.txt")]);
    }

    #[test]
    fn any_path_is_accepted_as_input() {
        proptest::proptest!(|(s in "[A-Za-z0-9._/]{1,32}")| {
            match Input::from_str(&s) {
                Ok(Input::File(p)) => proptest::prop_assert_eq!(p, PathBuf::from(&s)),
                other => proptest::prop_assert!(false, "unexpected {:?}", other),
            }
        })
    }
}
