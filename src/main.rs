use course_eligibility_core::app::console::{print_suggestions, print_view, ConsoleView};
use course_eligibility_core::client::NoWasmClient;
use course_eligibility_core::interface::HttpClient;
use course_eligibility_core::{Config, Controller, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("usage: {} <register_number> [course_title]", args[0]);
        return Ok(());
    }

    let config = Config::from_env();
    log::info!("backend: {}", config.api_base);

    let client = NoWasmClient::new(&config).await?;
    let controller = Controller::new(client, config, ConsoleView);

    controller.on_register_input(&args[1]);
    controller.check_register_number().await;

    if let Some(course_title) = args.get(2) {
        controller.set_course_title(course_title);
        controller.refresh_suggestions().await;
        print_suggestions(&controller.state());

        controller.check_eligibility().await;
    }

    print_view(&controller.state());
    Ok(())
}
