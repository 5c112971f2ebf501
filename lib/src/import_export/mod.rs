pub mod import;
pub mod netscape;

// Re-export main functions for convenience
pub use import::{
    import_netscape_backup, translate_netscape_bookmarks, ImportOptions, MissingUrlPolicy,
};
pub use netscape::{parse_netscape_file, parse_netscape_html, SourceFolder, SourceLink, SourceNode};
