//! Template files copied verbatim into the project.

/// Entrypoint script placed at the project root under the chosen name.
pub const ENTRYPOINT: &[u8] = include_bytes!("../assets/clia.js");

/// Starter commands written to `commands/<name>.js`, in the order they are added.
pub const STARTER_COMMANDS: &[(&str, &[u8])] = &[
    ("use", include_bytes!("../assets/commands/use.js")),
    (
        "add-requirement",
        include_bytes!("../assets/commands/add-requirement.js"),
    ),
];

