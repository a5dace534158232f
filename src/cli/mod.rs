use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the conversion form and the `/api/convert` endpoint
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,

        /// Answer with an offline echo instead of calling the completion service
        #[arg(long)]
        mock_completion: bool,
    },

    /// Convert one message through a running server
    Convert {
        message: String,

        /// Recipient's MBTI type
        #[arg(short = 't', long = "type", default_value = "INTJ")]
        mbti_type: String,

        /// Root URL of the server
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        endpoint: String,
    },
}
