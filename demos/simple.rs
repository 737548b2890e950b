use npc_json::analyze;

fn main() {
    let source = r#"
        // party members: [name, level, [hp, mp]]
        [
            ["aria", 12, [140.5, 60.0]],
            ["bram", 9, [210.0, 0.0]],
            ["cass", 14, [95.25, 180.0]],
        ]
    "#;

    match analyze(source, "party.npcj") {
        Ok(result) => match result.to_json() {
            Ok(json_output) => println!("Successfully parsed npc-json to JSON:\n{json_output}"),
            Err(e) => eprintln!("Failed to convert to JSON: {e}"),
        },
        Err(e) => {
            eprintln!("{:?}", e.into_report("party.npcj", source));
        }
    }
}
