pub mod handlers;

// Re-export the helpers the subcommands are built from
pub use handlers::{
    build_route_table, check_path, load_menus_from_file, parse_menu_document, parse_roles,
    process_menus, resolve_config, write_state_files, DEFAULT_MENUS,
};
