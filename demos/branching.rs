use nodeflow::{
    new_action_node, new_decision_node, ComputationMode, ComputeState, Context, Engine, JoinMode,
    NodeError, NodeSystem,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    println!("=== nodeflow branching demo ===\n");

    let classify = new_decision_node("is_big", |ctx: &Context| {
        match ctx.read("n").and_then(|v| v.as_i64()) {
            Some(n) => ComputeState::new_continue_on_branch(n > 5),
            None => ComputeState::new_abort(NodeError::VariableNotFound("n".into())),
        }
    });
    let big = new_action_node("big", |ctx: &Context| {
        ctx.store("label", "big");
        ComputeState::new_continue()
    });
    let small = new_action_node("small", |ctx: &Context| {
        ctx.store("label", "small");
        ComputeState::new_continue()
    });
    let publish = new_action_node("publish", |ctx: &Context| {
        ctx.store("published", true);
        ComputeState::new_continue()
    });

    let mut system = NodeSystem::new();
    system.add_node(classify.clone()).unwrap();
    system.add_node(big.clone()).unwrap();
    system.add_node(small.clone()).unwrap();
    system.add_node(publish.clone()).unwrap();
    system.add_link_on_branch(&classify, &big, true).unwrap();
    system.add_link_on_branch(&classify, &small, false).unwrap();
    system.add_link(&big, &publish).unwrap();
    system.add_link(&small, &publish).unwrap();
    system
        .configure_join_mode_on_node(&publish, JoinMode::Or)
        .unwrap();

    let mut engine = Engine::new(ComputationMode::Sequential);
    engine.configure_node_system(system).unwrap();

    for n in [10, 3] {
        let context = Context::new();
        context.store("n", n);
        let report = engine.compute(context).await.unwrap();
        println!(
            "n = {}: success = {}, label = {:?}",
            n,
            report.success(),
            report.context().read("label")
        );
    }
}
