use arcrun::echo::LogEcho;
use arcrun::entry::CommandEntryPoint;
use arcrun::Error;
use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut entry = CommandEntryPoint::from_env();
    let status = match arcrun::frontend::launch(std::env::args_os(), &mut LogEcho, &mut entry) {
        Ok(status) => status,
        Err(Error::HelpRequested(e)) => e.exit(),
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    };
    std::process::exit(status);
}
