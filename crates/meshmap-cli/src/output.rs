use meshmap_common::{Classification, MapScene, Node, QualityTier};

const NOT_AVAILABLE: &str = "N/A";

pub fn print_gateway(host: &str, scene: &MapScene) {
    println!("\n=== Gateway {host} ===\n");
    println!("{:<12} {}", "Marker:", scene.gateway_marker.label);
    let center = format!("{:.5}, {:.5}", scene.center.latitude, scene.center.longitude);
    if scene.gateway_located {
        println!("{:<12} {center}", "Center:");
    } else {
        println!("{:<12} {center} (default, gateway reported no position)", "Center:");
    }
    println!(
        "{:<12} red <= {} dB, green >= {} dB",
        "Thresholds:", scene.thresholds.lower, scene.thresholds.upper
    );
}

pub fn print_connections(nodes: &[Node], classification: &Classification) {
    println!("\n=== Direct Connections ({}) ===\n", nodes.len());
    if nodes.is_empty() {
        println!("(No direct connections)");
        return;
    }

    println!(
        "{:<20} {:<12} {:<8} {:<8} {:<11} {:<22} {:<6}",
        "NAME", "ID", "SNR", "HOPS", "LAST HEARD", "POSITION", "TIER"
    );
    println!("{:-<93}", "");
    for (node, tier) in nodes.iter().zip(&classification.tiers) {
        println!("{}", format_row(node, *tier));
    }
}

fn format_row(node: &Node, tier: QualityTier) -> String {
    let snr = node
        .signal_quality
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let position = node
        .coordinates
        .map(|c| format!("{:.4}, {:.4}", c.latitude, c.longitude))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!(
        "{:<20} {:<12} {:<8} {:<8} {:<11} {:<22} {:<6}",
        node.name,
        node.id,
        snr,
        node.hops_away.to_string(),
        format!("{}s", node.last_heard_secs),
        position,
        tier.as_str()
    )
}
