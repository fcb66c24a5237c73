/// Asserts that no two entities share a cell, that the occupancy grid agrees
/// with the entity lists and that carried fruit sit on their carriers.
#[macro_export]
macro_rules! assert_occupancy_consistent {
    ($world:expr) => {{
        let world = &$world;
        let mut seen = std::collections::HashSet::new();
        for agent in world.agents() {
            assert!(
                seen.insert(agent.position),
                "Agent {} shares cell {:?}",
                agent.id.0,
                agent.position
            );
            assert_eq!(
                world.cell(agent.position),
                Some(fruitsort_data::Cell::Agent(agent.id)),
                "Grid disagrees with agent {}",
                agent.id.0
            );
            if let Some(fruit) = agent.carrying {
                assert_eq!(world.fruits()[fruit.0].position, agent.position);
                assert!(world.fruits()[fruit.0].carried);
            }
        }
        for (i, fruit) in world.fruits().iter().enumerate().filter(|(_, f)| !f.carried) {
            assert!(
                seen.insert(fruit.position),
                "Fruit {} shares cell {:?}",
                i,
                fruit.position
            );
        }
        let carried = world.fruits().iter().filter(|f| f.carried).count();
        let carriers = world.agents().iter().filter(|a| a.is_carrying()).count();
        assert_eq!(carried, carriers, "Carried fruit without a carrier");
    }};
}

/// Asserts that every coupled helper points at a primary carrying a heavy
/// fruit that points back at it.
#[macro_export]
macro_rules! assert_couplings_consistent {
    ($world:expr) => {{
        let world = &$world;
        for helper in world.agents().iter().filter(|a| a.is_helping) {
            let partner = helper.partner.expect("Coupled helper without partner");
            let primary = &world.agents()[partner.0];
            assert_eq!(primary.partner, Some(helper.id));
            let fruit = primary.carrying.expect("Primary is not carrying");
            assert!(world.fruits()[fruit.0].kind.is_heavy());
        }
    }};
}
