//! Intercepted operations
//!
//! This module declares the closed set of operations the wrapper surface
//! can intercept, together with their trace markers, and the per-wrapper
//! call site descriptor.
//!
//! The model for message-passing events is `M`. Vector variants of the
//! collectives (`v` and `w` forms) are aliases of their base operation so
//! that they share its trace category. Large-count flavors never get
//! markers of their own: they map onto the same operation as the regular
//! flavor.

use sonar_macros::OperationTable;

use crate::symbol::CachedAddress;

/// A logical intercepted operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, OperationTable)]
pub enum Operation {
	// Initializing
	#[markers("MUi", "MUI")]
	Init,
	#[markers("MUt", "MUT")]
	InitThread,
	#[markers("MUf", "MUF")]
	Finalize,

	// Waiting requests
	#[markers("MW[", "MW]")]
	Wait,
	#[markers("MWa", "MWA")]
	Waitall,
	#[markers("MWy", "MWY")]
	Waitany,
	#[markers("MWs", "MWS")]
	Waitsome,

	// Testing requests
	#[markers("MT[", "MT]")]
	Test,
	#[markers("MTa", "MTA")]
	Testall,
	#[markers("MTy", "MTY")]
	Testany,
	#[markers("MTs", "MTS")]
	Testsome,

	// Blocking primitives
	#[markers("MR[", "MR]")]
	Recv,
	#[markers("MS[", "MS]")]
	Send,
	#[markers("MSb", "MSB")]
	Bsend,
	#[markers("MSr", "MSR")]
	Rsend,
	#[markers("MSs", "MSS")]
	Ssend,
	#[markers("MRs", "MRS")]
	Sendrecv,
	#[markers("MRo", "MRO")]
	SendrecvReplace,

	// Blocking collectives
	#[markers("MAg", "MAG")]
	Allgather,
	#[markers("MAg", "MAG", alias)]
	Allgatherv,
	#[markers("MAr", "MAR")]
	Allreduce,
	#[markers("MAa", "MAA")]
	Alltoall,
	#[markers("MAa", "MAA", alias)]
	Alltoallv,
	#[markers("MAa", "MAA", alias)]
	Alltoallw,
	#[markers("MCb", "MCB")]
	Barrier,
	#[markers("MDb", "MDB")]
	Bcast,
	#[markers("MDg", "MDG")]
	Gather,
	#[markers("MDg", "MDG", alias)]
	Gatherv,
	#[markers("ME[", "ME]")]
	Reduce,
	#[markers("MEs", "MES")]
	ReduceScatter,
	#[markers("MEb", "MEB")]
	ReduceScatterBlock,
	#[markers("MDs", "MDS")]
	Scatter,
	#[markers("MDs", "MDS", alias)]
	Scatterv,
	#[markers("MCs", "MCS")]
	Scan,
	#[markers("MCe", "MCE")]
	Exscan,

	// Non-blocking primitives
	#[markers("Mr[", "Mr]")]
	Irecv,
	#[markers("Ms[", "Ms]")]
	Isend,
	#[markers("Msb", "MsB")]
	Ibsend,
	#[markers("Msr", "MsR")]
	Irsend,
	#[markers("Mss", "MsS")]
	Issend,
	#[markers("Mrs", "MrS")]
	Isendrecv,
	#[markers("Mro", "MrO")]
	IsendrecvReplace,

	// Non-blocking collectives
	#[markers("Mag", "MaG")]
	Iallgather,
	#[markers("Mag", "MaG", alias)]
	Iallgatherv,
	#[markers("Mar", "MaR")]
	Iallreduce,
	#[markers("Maa", "MaA")]
	Ialltoall,
	#[markers("Maa", "MaA", alias)]
	Ialltoallv,
	#[markers("Maa", "MaA", alias)]
	Ialltoallw,
	#[markers("Mcb", "McB")]
	Ibarrier,
	#[markers("Mdb", "MdB")]
	Ibcast,
	#[markers("Mdg", "MdG")]
	Igather,
	#[markers("Mdg", "MdG", alias)]
	Igatherv,
	#[markers("Me[", "Me]")]
	Ireduce,
	#[markers("Mes", "MeS")]
	IreduceScatter,
	#[markers("Meb", "MeB")]
	IreduceScatterBlock,
	#[markers("Mds", "MdS")]
	Iscatter,
	#[markers("Mds", "MdS", alias)]
	Iscatterv,
	#[markers("Mcs", "McS")]
	Iscan,
	#[markers("Mce", "McE")]
	Iexscan,
}

/// Calling convention surface a wrapper belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
	/// C entry points (`MPI_Send`)
	C,
	/// Fortran entry points (`mpi_send_`)
	Fortran,
}

/// Element count representation of a wrapper signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
	/// Fixed-width counts
	Regular,
	/// Wide counts (`_c` suffixed entry points)
	Large,
}

/// Static description of one wrapped entry point
#[derive(Debug)]
pub struct CallSite {
	/// Exported name of the entry point, also looked up in the next module
	pub name: &'static str,
	/// Operation whose markers bracket the call
	pub operation: Operation,
	pub binding: Binding,
	pub flavor: Flavor,
	/// Real implementation, once resolved
	pub(crate) real: CachedAddress,
}

impl CallSite {
	#[must_use]
	pub const fn new(name: &'static str, operation: Operation, binding: Binding, flavor: Flavor) -> Self {
		Self {
			name,
			operation,
			binding,
			flavor,
			real: CachedAddress::new(),
		}
	}
}
