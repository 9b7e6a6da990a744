use std::path::Path;

use block_schedule::layout::{
    Task, allocate_widths, assign_left, build_task_tree, correct_min_widths, map_temporal_axis,
};
use block_schedule::layout_dump::LayoutDump;
use block_schedule::{
    LayoutConfig, LayoutError, ParseOptions, RenderConfig, Theme, compute_layout, parse_project,
    render_svg,
};

fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture read failed")
}

fn arena_for(input: &str) -> Vec<Task> {
    let project = parse_project(input, &ParseOptions::default()).expect("parse failed");
    project
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, record)| Task::from_record(idx, record))
        .collect()
}

fn subtree_size(tasks: &[Task], idx: usize) -> usize {
    tasks[idx]
        .children
        .iter()
        .map(|&child| 1 + subtree_size(tasks, child))
        .sum()
}

#[test]
fn office_move_fixture_lays_out_and_renders() {
    let input = load_fixture("office_move.json5");
    let project = parse_project(&input, &ParseOptions::default()).expect("parse failed");
    let layout = compute_layout(&project, &LayoutConfig::default()).expect("layout failed");

    assert_eq!(layout.tasks.len(), 11);
    assert_eq!(layout.root_task().name, "Office move");
    assert_eq!(layout.root_task().descendant_count, 10);
    assert_eq!(layout.milestones.len(), 2);
    assert_eq!(layout.milestones[0].name, "Lease signed | Budget released");
    assert_eq!(layout.milestones[1].name, "Move day");

    let svg = render_svg(&layout, &Theme::classic(), &RenderConfig::default());
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("Move day [28-06-2024]"));
}

#[test]
fn descendant_counts_match_independent_walk() {
    let mut tasks = arena_for(&load_fixture("office_move.json5"));
    build_task_tree(&mut tasks).unwrap();
    for idx in 0..tasks.len() {
        assert_eq!(tasks[idx].descendant_count, subtree_size(&tasks, idx));
    }
}

#[test]
fn exactly_one_root_after_tree_building() {
    let mut tasks = arena_for(&load_fixture("office_move.json5"));
    let root = build_task_tree(&mut tasks).unwrap();
    let parentless: Vec<usize> = (0..tasks.len())
        .filter(|&idx| tasks[idx].parent.is_none())
        .collect();
    assert_eq!(parentless, vec![root]);
}

#[test]
fn allocated_children_partition_parent_width() {
    let mut tasks = arena_for(&load_fixture("office_move.json5"));
    let root = build_task_tree(&mut tasks).unwrap();
    allocate_widths(&mut tasks, root, 1000.0, 5.0);
    for task in &tasks {
        let k = task.children.len();
        if k == 0 {
            continue;
        }
        let sum: f64 = task.children.iter().map(|&c| tasks[c].width).sum();
        let total = sum + (k as f64 + 1.0) * 5.0;
        assert!((total - task.width).abs() < 1e-9, "{}: {total} vs {}", task.name, task.width);
    }
}

#[test]
fn three_block_scenario() {
    let input = r#"{ "start": "2024-01-01", "tasks": [
        { "name": "P", "start": "2024-01-01", "finish": "2024-01-31", "outlineNumber": "1" },
        { "name": "A", "start": "2024-01-01", "finish": "2024-01-15", "outlineNumber": "1.1" },
        { "name": "B", "start": "2024-01-16", "finish": "2024-01-31", "outlineNumber": "1.2" }
    ] }"#;
    let mut tasks = arena_for(input);
    let root = build_task_tree(&mut tasks).unwrap();
    allocate_widths(&mut tasks, root, 1000.0, 5.0);
    assert_eq!(tasks[1].width, 492.5);
    assert_eq!(tasks[2].width, 492.5);
    assign_left(&mut tasks, root, 5.0);
    assert_eq!(tasks[1].left, 5.0);
    assert_eq!(tasks[2].left, 502.5);
}

#[test]
fn same_day_task_height_is_passed_through() {
    let input = r#"{ "tasks": [
        { "name": "Only", "start": "2024-01-01", "finish": "2024-01-01", "outlineNumber": "1" }
    ] }"#;
    let project = parse_project(input, &ParseOptions::default()).unwrap();
    let layout = compute_layout(&project, &LayoutConfig::default()).unwrap();
    assert_eq!(layout.tasks[0].height, -9.0);
    assert_eq!(layout.tasks[0].top, 5.0);

    let mut tasks = arena_for(input);
    map_temporal_axis(&mut tasks, project.start, 5.0);
    assert_eq!(tasks[0].height, -9.0);
}

#[test]
fn narrow_siblings_add_up_on_parent() {
    let input = r#"{ "tasks": [
        { "name": "P", "start": "2024-01-01", "finish": "2024-01-31", "outlineNumber": "1" },
        { "name": "A", "start": "2024-01-01", "finish": "2024-01-15", "outlineNumber": "1.1" },
        { "name": "B", "start": "2024-01-16", "finish": "2024-01-31", "outlineNumber": "1.2" }
    ] }"#;
    let mut tasks = arena_for(input);
    build_task_tree(&mut tasks).unwrap();
    tasks[0].width = 50.0;
    tasks[1].width = 10.0;
    tasks[2].width = 12.0;
    correct_min_widths(&mut tasks, 20.0);
    assert_eq!(tasks[0].width, 68.0);
    assert_eq!(tasks[1].width, 20.0);
    assert_eq!(tasks[2].width, 20.0);
}

#[test]
fn narrow_layout_is_widened_through_pipeline() {
    let input = load_fixture("office_move.json5");
    let project = parse_project(&input, &ParseOptions::default()).unwrap();
    let config = LayoutConfig {
        total_width: 60.0,
        ..LayoutConfig::default()
    };
    let layout = compute_layout(&project, &config).unwrap();
    for task in &layout.tasks {
        assert!(task.width >= 20.0, "{} is {}", task.name, task.width);
    }
    assert!(layout.root_task().width > 60.0);
    assert_eq!(layout.max_width, layout.root_task().width);
}

#[test]
fn running_twice_gives_identical_geometry() {
    let input = load_fixture("office_move.json5");
    let project = parse_project(&input, &ParseOptions::default()).unwrap();
    let first = compute_layout(&project, &LayoutConfig::default()).unwrap();
    let second = compute_layout(&project, &LayoutConfig::default()).unwrap();
    for (a, b) in first.tasks.iter().zip(&second.tasks) {
        assert_eq!(a.top.to_bits(), b.top.to_bits());
        assert_eq!(a.height.to_bits(), b.height.to_bits());
        assert_eq!(a.left.to_bits(), b.left.to_bits());
        assert_eq!(a.width.to_bits(), b.width.to_bits());
    }
    let dump_a = serde_json::to_string(&LayoutDump::from_layout(&first)).unwrap();
    let dump_b = serde_json::to_string(&LayoutDump::from_layout(&second)).unwrap();
    assert_eq!(dump_a, dump_b);
}

#[test]
fn filtered_levels_keep_last_parentless_task_as_root() {
    let input = load_fixture("office_move.json5");
    let options = ParseOptions { levels: vec![2] };
    let project = parse_project(&input, &options).unwrap();
    assert_eq!(project.tasks.len(), 3);

    let layout = compute_layout(&project, &LayoutConfig::default()).unwrap();
    assert_eq!(layout.root_task().name, "Relocation");
    assert_eq!(layout.root_task().width, 1000.0);
    assert_eq!(layout.tasks[0].width, 20.0);
}

#[test]
fn project_without_tasks_aborts() {
    let input = r#"{ "start": "2024-01-01", "tasks": [] }"#;
    let project = parse_project(input, &ParseOptions::default()).unwrap();
    assert_eq!(
        compute_layout(&project, &LayoutConfig::default()).unwrap_err(),
        LayoutError::RootNotFound { task_count: 0 }
    );
}
