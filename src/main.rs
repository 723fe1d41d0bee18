use tokio::sync::watch;

use elevatorbank::config::SimConfig;
use elevatorbank::{bank_view, init, intake, manager, print};


#[tokio::main]
async fn main() {
    let sim = match init::parse_args() {
        Ok(sim) => sim,
        Err(e) => {
            print::err(format!("Invalid arguments: {:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(sim).await {
        print::err(format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(sim: SimConfig) -> anyhow::Result<()> {
    print::info(format!(
        "Starting elevator bank: {} cars, floors 1-{}, {} ms per round",
        sim.elevator_count, sim.max_floor, sim.round_period_ms
    ));

    /* START ----------- Intake av forespørslar ---------------------- */
    let (call_tx, call_rx) = intake::channel();
    let _reader = intake::spawn_reader(&sim, call_tx)?;
    /* SLUTT ----------- Intake av forespørslar ---------------------- */

    let bank = manager::Bank::from_config(&sim);
    let (view_tx, view_rx) = watch::channel(bank.view());

    // Task som printar heisbanken etter kvar runde
    {
        let _print_task = tokio::spawn(async move {
            bank_view::print_views(view_rx).await;
        });
    }

    print::ok("Dispatcher running".to_string());
    manager::run_dispatcher(bank, call_rx, view_tx, sim.round_period(), None).await;
    Ok(())
}
