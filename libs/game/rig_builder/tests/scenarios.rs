// This file is part of OpenFA.
//
// OpenFA is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenFA is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenFA.  If not, see <http://www.gnu.org/licenses/>.
//! End-to-end pipelines: text in, built [`Rig`] out, through the real
//! `rigdef::parse` + `rig_builder::build` chain (spec.md §8).
use rigdef::error::DiagnosticList;

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn parse_and_build(text: &str) -> (rig_builder::rig::Rig, DiagnosticList) {
    let file = rigdef::parse(lines(text).into_iter());
    let mut diags = DiagnosticList::new();
    let rig = rig_builder::build(&file, &[], &mut diags);
    (rig, diags)
}

#[test]
fn two_node_beam_builds_a_single_beam() {
    let (rig, diags) = parse_and_build(
        "\
nodes
0, 0.0, 0.0, 0.0
1, 2.0, 0.0, 0.0
beams
0, 1
",
    );
    assert!(!diags.has_errors(), "{:?}", diags.into_vec());
    assert_eq!(rig.nodes.len(), 2);
    assert_eq!(rig.beams.len(), 1);
    let beam = &rig.beams[0];
    assert_eq!(beam.nodes, [0, 1]);
    let length = (rig.nodes[beam.nodes[1]].position - rig.nodes[beam.nodes[0]].position).norm();
    assert!((length - 2.0).abs() < 1e-6);
}

#[test]
fn cinecam_anchors_eight_beams_to_a_synthetic_node() {
    let (rig, diags) = parse_and_build(
        "\
nodes
0, -1.0, 1.0, -1.0
1, 1.0, 1.0, -1.0
2, 1.0, 1.0, 1.0
3, -1.0, 1.0, 1.0
4, -1.0, 0.0, -1.0
5, 1.0, 0.0, -1.0
6, 1.0, 0.0, 1.0
7, -1.0, 0.0, 1.0
cinecam
0.0, 0.8, 0.0, 0, 1, 2, 3, 4, 5, 6, 7, 8000, 400
",
    );
    assert!(!diags.has_errors(), "{:?}", diags.into_vec());
    assert_eq!(rig.nodes.len(), 9);
    assert_eq!(rig.cinecams.len(), 1);
    assert_eq!(rig.beams.len(), 8);
    // every support beam shares one endpoint: the synthetic cinecam node.
    let cinecam_node = rig.beams[0].nodes[0];
    assert!(rig.beams.iter().all(|b| b.nodes[0] == cinecam_node));
    assert_eq!(rig.cinecams[0].nodes.iter().copied().collect::<std::collections::HashSet<_>>().len(), 8);
}

#[test]
fn single_ring_wheel_with_propulsion_builds_expected_geometry() {
    let (rig, diags) = parse_and_build(
        "\
nodes
0, -1.0, 0.0, 0.0
1, 1.0, 0.0, 0.0
2, 0.0, 1.0, 0.0
wheels
0.5, 0.2, 4, 0, 1, 9999, 0, 1, 2, 10, 8000, 400, face, band
",
    );
    assert!(!diags.has_errors(), "{:?}", diags.into_vec());
    assert_eq!(rig.wheels.len(), 1);
    let wheel = &rig.wheels[0];
    assert!(wheel.is_propelled());
    assert!(!wheel.is_braked());
    assert_eq!(wheel.rigidity_node, None);
    assert_eq!(wheel.node_indices.len(), 8);
    assert_eq!(wheel.beam_indices.len(), 32); // 8 * rays
    assert_eq!(rig.nodes.len(), 3 + 8);
    assert_eq!(rig.beams.len(), 32);
}

#[test]
fn trigger_blocks_a_declared_command_key_without_warning() {
    let (rig, diags) = parse_and_build(
        "\
nodes
0, 0.0, 0.0, 0.0
1, 1.0, 0.0, 0.0
2, 2.0, 0.0, 0.0
commands2
0, 1, 1.0, 1.0, 0.2, 0.2, 5, 6
triggers
0, 2, 0.5, 1.5, 5, 0, b
",
    );
    assert!(!diags.has_errors(), "{:?}", diags.into_vec());
    assert_eq!(rig.commands.len(), 1);
    assert_eq!(rig.triggers.len(), 1);
    assert!(rig.command_keys.iter().any(|k| k.key == 5));
    assert!(diags.is_empty(), "blocking a key that a command declares shouldn't warn");
}

#[test]
fn trigger_blocking_an_undeclared_key_warns() {
    let (_, diags) = parse_and_build(
        "\
nodes
0, 0.0, 0.0, 0.0
1, 1.0, 0.0, 0.0
triggers
0, 1, 0.5, 1.5, 99, 0, b
",
    );
    assert!(!diags.has_errors());
    assert!(!diags.is_empty(), "blocking a key no command declares should warn");
}

#[test]
fn legacy_numbered_reference_past_the_node_table_warns_but_does_not_fail() {
    let (rig, diags) = parse_and_build(
        "\
nodes
0, 0.0, 0.0, 0.0
1, 1.0, 0.0, 0.0
beams
0, 1
0, 50
",
    );
    assert!(!diags.has_errors());
    assert!(!diags.is_empty());
    assert_eq!(rig.beams.len(), 1, "the beam referencing node 50 should be dropped, not crash the build");
}

#[test]
fn flexbody_forset_expands_a_range() {
    let (rig, diags) = parse_and_build(
        "\
nodes
0, 0.0, 0.0, 0.0
1, 1.0, 0.0, 0.0
2, 2.0, 0.0, 0.0
3, 3.0, 0.0, 0.0
4, 4.0, 0.0, 0.0
5, 5.0, 0.0, 0.0
flexbodies
0,1,2,0,0,0,0,0,0,body.mesh
forset 0-3, 5
",
    );
    assert!(!diags.has_errors(), "{:?}", diags.into_vec());
    assert_eq!(rig.flexbodies.len(), 1);
    assert_eq!(rig.flexbodies[0].forset_nodes.len(), 5);
}

#[test]
fn rigidity_sentinel_9999_and_minus_one_are_equivalent() {
    let (rig_9999, diags_9999) = parse_and_build(
        "\
nodes
0, -1.0, 0.0, 0.0
1, 1.0, 0.0, 0.0
2, 0.0, 1.0, 0.0
wheels
0.5, 0.2, 4, 0, 1, 9999, 0, 0, 2, 10, 8000, 400, face, band
",
    );
    let (rig_neg1, diags_neg1) = parse_and_build(
        "\
nodes
0, -1.0, 0.0, 0.0
1, 1.0, 0.0, 0.0
2, 0.0, 1.0, 0.0
wheels
0.5, 0.2, 4, 0, 1, -1, 0, 0, 2, 10, 8000, 400, face, band
",
    );
    assert!(!diags_9999.has_errors());
    assert!(!diags_neg1.has_errors());
    assert_eq!(rig_9999.wheels[0].rigidity_node, None);
    assert_eq!(rig_neg1.wheels[0].rigidity_node, None);
    assert_eq!(rig_9999.beams.len(), rig_neg1.beams.len());
}

#[test]
fn capacity_overflow_drops_extra_nodes_with_a_diagnostic() {
    let mut text = String::from("nodes\n");
    for i in 0..5000 {
        text.push_str(&format!("{i}, {}, 0.0, 0.0\n", i as f32));
    }
    let (rig, diags) = parse_and_build(&text);
    assert!(diags.has_errors(), "exceeding MAX_NODES should raise an error diagnostic");
    assert_eq!(rig.nodes.len(), rig_builder::limits::MAX_NODES);
}
