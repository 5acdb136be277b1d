use nodeflow::{
    new_action_node, ComputationMode, ComputeState, Context, Engine, NodeError, NodeSystem,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    println!("=== nodeflow linear pipeline demo ===\n");

    let load = new_action_node("load", |ctx: &Context| {
        ctx.store("value", 21);
        ComputeState::new_continue()
    });
    let double = new_action_node("double", |ctx: &Context| {
        match ctx.read("value").and_then(|v| v.as_i64()) {
            Some(value) => {
                ctx.store("value", value * 2);
                ComputeState::new_continue()
            }
            None => ComputeState::new_abort(NodeError::VariableNotFound("value".into())),
        }
    });
    let publish = new_action_node("publish", |ctx: &Context| {
        ctx.store("published", true);
        ComputeState::new_continue()
    });

    let mut system = NodeSystem::new();
    system.add_node(load.clone()).unwrap();
    system.add_node(double.clone()).unwrap();
    system.add_node(publish.clone()).unwrap();
    system.add_link(&load, &double).unwrap();
    system.add_link(&double, &publish).unwrap();

    let mut engine = Engine::new(ComputationMode::Sequential);
    engine.configure_node_system(system).unwrap();

    let report = engine.compute(Context::new()).await.unwrap();

    println!("success: {}", report.success());
    for (node, state) in report.recorded() {
        println!("  {:?} -> {}", node, state);
    }
    println!("final context: {:?}", report.context().snapshot());
}
