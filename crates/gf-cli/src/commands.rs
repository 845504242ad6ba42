use gf_core::Role;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Create an account and its profile
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Display name stored on the profile
        #[arg(long)]
        name: String,

        /// Requested role (admin or member)
        #[arg(long, default_value = "member")]
        role: Role,
    },

    /// Sign out of the current session
    Logout,
}
