//! Tests for the operation registry and its startup validation

use std::collections::HashSet;

use sonar_rs::registry::{self, Marker, MarkerPair, OperationTable, Registry};
use sonar_rs::{Operation, SonarError};

#[test]
fn builtin_table_is_valid() {
	registry::validate(Operation::TABLE).expect("built-in table must validate");
	assert_eq!(Operation::TABLE.len(), Operation::COUNT);
	assert!(Registry::builtin::<Operation>().validate().is_ok());
}

#[test]
fn table_is_indexed_by_operation() {
	for (index, operation) in Operation::ALL.iter().enumerate() {
		assert_eq!(operation.index(), index);
	}

	let send = Operation::Send.markers();
	assert_eq!(send.enter.as_str(), "MS[");
	assert_eq!(send.exit.as_str(), "MS]");
	assert!(!send.alias);

	assert_eq!(Operation::Init.markers().enter.as_str(), "MUi");
	assert_eq!(Operation::Iexscan.markers().exit.as_str(), "McE");
	assert_eq!(Operation::IreduceScatterBlock.name(), "IreduceScatterBlock");
}

#[test]
fn vector_variants_share_markers() {
	let pairs = [
		(Operation::Allgatherv, Operation::Allgather),
		(Operation::Alltoallv, Operation::Alltoall),
		(Operation::Alltoallw, Operation::Alltoall),
		(Operation::Gatherv, Operation::Gather),
		(Operation::Scatterv, Operation::Scatter),
		(Operation::Iallgatherv, Operation::Iallgather),
		(Operation::Ialltoallv, Operation::Ialltoall),
		(Operation::Ialltoallw, Operation::Ialltoall),
		(Operation::Igatherv, Operation::Igather),
		(Operation::Iscatterv, Operation::Iscatter),
	];

	for (alias, target) in pairs {
		assert!(alias.markers().alias, "{} should be an alias", alias.name());
		assert_eq!(alias.markers().enter, target.markers().enter);
		assert_eq!(alias.markers().exit, target.markers().exit);
	}
}

#[test]
fn canonical_markers_are_distinct() {
	let mut seen: HashSet<Marker> = HashSet::new();
	let mut canonical = 0;

	for pair in Operation::TABLE.iter().filter(|pair| !pair.alias) {
		canonical += 1;
		assert!(seen.insert(pair.enter), "{} repeated", pair.enter);
		assert!(seen.insert(pair.exit), "{} repeated", pair.exit);
	}

	assert_eq!(seen.len(), canonical * 2);
	assert_ne!(Operation::Barrier.markers().enter, Operation::Allgather.markers().enter);
}

#[test]
fn repeated_marker_is_rejected() {
	let table = [MarkerPair::new("MS[", "MS]"), MarkerPair::new("MS[", "MX]")];
	assert!(matches!(registry::validate(&table), Err(SonarError::RepeatedMarker("MS["))));

	// Enter and exit of a single entry collide too
	let table = [MarkerPair::new("MB[", "MB[")];
	assert!(matches!(registry::validate(&table), Err(SonarError::RepeatedMarker("MB["))));
}

#[test]
fn alias_without_target_is_rejected() {
	let table = [MarkerPair::new("MS[", "MS]"), MarkerPair::alias("MR[", "MR]")];
	assert!(matches!(
		registry::validate(&table),
		Err(SonarError::MissingAliasTarget("MR["))
	));

	// The target must come first
	let table = [MarkerPair::alias("MS[", "MS]"), MarkerPair::new("MS[", "MS]")];
	assert!(matches!(
		registry::validate(&table),
		Err(SonarError::MissingAliasTarget("MS["))
	));
}

#[test]
fn alias_after_target_is_accepted() {
	let table = [
		MarkerPair::new("MAg", "MAG"),
		MarkerPair::alias("MAg", "MAG"),
		MarkerPair::alias("MAg", "MAG"),
	];
	assert!(registry::validate(&table).is_ok());
}

#[test]
fn malformed_marker_is_rejected() {
	let table = [MarkerPair::new("MS", "MS]")];
	assert!(matches!(registry::validate(&table), Err(SonarError::MalformedMarker("MS"))));

	let table = [MarkerPair::new("MS[", "MSé")];
	assert!(matches!(registry::validate(&table), Err(SonarError::MalformedMarker(_))));
}

#[test]
fn registry_checks_table_size() {
	static SHORT: [MarkerPair; 1] = [MarkerPair::new("MS[", "MS]")];

	let err = Registry::new::<Operation>(&SHORT).unwrap_err();
	match err {
		SonarError::TableSize { expected, found } => {
			assert_eq!(expected, Operation::COUNT);
			assert_eq!(found, 1);
		},
		other => panic!("unexpected error: {other}"),
	}

	let registry = Registry::new::<Operation>(Operation::TABLE).unwrap();
	assert_eq!(registry.len(), Operation::COUNT);
	assert_eq!(registry.markers(Operation::Bcast).enter.as_str(), "MDb");
}
