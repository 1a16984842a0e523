//! C binding wrappers

use std::ffi::{c_char, c_int};

use sonar_rs::{Binding, CallSite, Flavor, Operation, Result, Runtime, SonarError, interpose, runtime};

use crate::abi::{
	Aint, Comm, Count, Datatype, LargeCount, Op, RecvBuf, Request, SUCCESS, SendBuf, Status, comm_world,
};

type CommQuery = unsafe extern "C" fn(Comm, *mut c_int) -> c_int;

/// Rank and size of the process in `MPI_COMM_WORLD`
fn identity(runtime: &Runtime) -> Result<(i32, i32)> {
	let world = comm_world(runtime)?;
	let comm_rank: CommQuery = unsafe { runtime.resolve("MPI_Comm_rank")? };
	let comm_size: CommQuery = unsafe { runtime.resolve("MPI_Comm_size")? };

	let mut rank = 0;
	if unsafe { comm_rank(world, &mut rank) } != SUCCESS {
		return Err(SonarError::from("Could not retrieve the MPI rank"));
	}

	let mut size = 0;
	if unsafe { comm_size(world, &mut size) } != SUCCESS {
		return Err(SonarError::from("Could not retrieve the MPI rank size"));
	}

	Ok((rank, size))
}

static INIT: CallSite = CallSite::new("MPI_Init", Operation::Init, Binding::C, Flavor::Regular);
static INIT_THREAD: CallSite = CallSite::new("MPI_Init_thread", Operation::InitThread, Binding::C, Flavor::Regular);
static FINALIZE: CallSite = CallSite::new("MPI_Finalize", Operation::Finalize, Binding::C, Flavor::Regular);

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn MPI_Init(argc: *mut c_int, argv: *mut *mut *mut c_char) -> c_int {
	let forward = |real: unsafe extern "C" fn(*mut c_int, *mut *mut *mut c_char) -> c_int| unsafe { real(argc, argv) };
	unsafe { runtime().process_init(&INIT, forward, identity) }
}

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn MPI_Init_thread(
	argc: *mut c_int,
	argv: *mut *mut *mut c_char,
	required: c_int,
	provided: *mut c_int,
) -> c_int {
	let forward = |real: unsafe extern "C" fn(*mut c_int, *mut *mut *mut c_char, c_int, *mut c_int) -> c_int| unsafe {
		real(argc, argv, required, provided)
	};
	unsafe { runtime().process_init(&INIT_THREAD, forward, identity) }
}

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn MPI_Finalize() -> c_int {
	let forward = |real: unsafe extern "C" fn() -> c_int| unsafe { real() };
	unsafe { runtime().process_finalize(&FINALIZE, forward) }
}

interpose! {
	binding = C;

	// Waiting requests
	fn MPI_Wait(request: *mut Request, status: *mut Status) -> c_int => Wait;
	fn MPI_Waitall(count: Count, requests: *mut Request, statuses: *mut Status) -> c_int => Waitall;
	fn MPI_Waitany(count: Count, requests: *mut Request, index: *mut c_int, status: *mut Status) -> c_int => Waitany;
	fn MPI_Waitsome(
		incount: Count, requests: *mut Request, outcount: *mut c_int, indices: *mut c_int, statuses: *mut Status
	) -> c_int => Waitsome;

	// Testing requests
	fn MPI_Test(request: *mut Request, flag: *mut c_int, status: *mut Status) -> c_int => Test;
	fn MPI_Testall(count: Count, requests: *mut Request, flag: *mut c_int, statuses: *mut Status) -> c_int => Testall;
	fn MPI_Testany(
		count: Count, requests: *mut Request, index: *mut c_int, flag: *mut c_int, status: *mut Status
	) -> c_int => Testany;
	fn MPI_Testsome(
		incount: Count, requests: *mut Request, outcount: *mut c_int, indices: *mut c_int, statuses: *mut Status
	) -> c_int => Testsome;

	// Blocking primitives
	fn MPI_Bsend(buf: SendBuf, count: Count, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm) -> c_int => Bsend;
	fn MPI_Recv(
		buf: RecvBuf, count: Count, datatype: Datatype, source: c_int, tag: c_int, comm: Comm, status: *mut Status
	) -> c_int => Recv;
	fn MPI_Rsend(buf: SendBuf, count: Count, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm) -> c_int => Rsend;
	fn MPI_Send(buf: SendBuf, count: Count, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm) -> c_int => Send;
	fn MPI_Sendrecv(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, dest: c_int, sendtag: c_int,
		recvbuf: RecvBuf, recvcount: Count, recvtype: Datatype, source: c_int, recvtag: c_int,
		comm: Comm, status: *mut Status
	) -> c_int => Sendrecv;
	fn MPI_Sendrecv_replace(
		buf: RecvBuf, count: Count, datatype: Datatype, dest: c_int, sendtag: c_int, source: c_int,
		recvtag: c_int, comm: Comm, status: *mut Status
	) -> c_int => SendrecvReplace;
	fn MPI_Ssend(buf: SendBuf, count: Count, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm) -> c_int => Ssend;

	// Blocking collectives
	fn MPI_Allgather(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcount: Count,
		recvtype: Datatype, comm: Comm
	) -> c_int => Allgather;
	fn MPI_Allgatherv(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcounts: *const Count,
		displs: *const c_int, recvtype: Datatype, comm: Comm
	) -> c_int => Allgatherv;
	fn MPI_Allreduce(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: Count, datatype: Datatype, op: Op, comm: Comm
	) -> c_int => Allreduce;
	fn MPI_Alltoall(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcount: Count,
		recvtype: Datatype, comm: Comm
	) -> c_int => Alltoall;
	fn MPI_Alltoallv(
		sendbuf: SendBuf, sendcounts: *const Count, sdispls: *const c_int, sendtype: Datatype,
		recvbuf: RecvBuf, recvcounts: *const Count, rdispls: *const c_int, recvtype: Datatype, comm: Comm
	) -> c_int => Alltoallv;
	fn MPI_Alltoallw(
		sendbuf: SendBuf, sendcounts: *const Count, sdispls: *const c_int, sendtypes: *const Datatype,
		recvbuf: RecvBuf, recvcounts: *const Count, rdispls: *const c_int, recvtypes: *const Datatype,
		comm: Comm
	) -> c_int => Alltoallw;
	fn MPI_Barrier(comm: Comm) -> c_int => Barrier;
	fn MPI_Bcast(buffer: RecvBuf, count: Count, datatype: Datatype, root: c_int, comm: Comm) -> c_int => Bcast;
	fn MPI_Gather(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcount: Count,
		recvtype: Datatype, root: c_int, comm: Comm
	) -> c_int => Gather;
	fn MPI_Gatherv(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcounts: *const Count,
		displs: *const c_int, recvtype: Datatype, root: c_int, comm: Comm
	) -> c_int => Gatherv;
	fn MPI_Reduce(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: Count, datatype: Datatype, op: Op, root: c_int, comm: Comm
	) -> c_int => Reduce;
	fn MPI_Reduce_scatter(
		sendbuf: SendBuf, recvbuf: RecvBuf, recvcounts: *const Count, datatype: Datatype, op: Op, comm: Comm
	) -> c_int => ReduceScatter;
	fn MPI_Reduce_scatter_block(
		sendbuf: SendBuf, recvbuf: RecvBuf, recvcount: Count, datatype: Datatype, op: Op, comm: Comm
	) -> c_int => ReduceScatterBlock;
	fn MPI_Scatter(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcount: Count,
		recvtype: Datatype, root: c_int, comm: Comm
	) -> c_int => Scatter;
	fn MPI_Scatterv(
		sendbuf: SendBuf, sendcounts: *const Count, displs: *const c_int, sendtype: Datatype,
		recvbuf: RecvBuf, recvcount: Count, recvtype: Datatype, root: c_int, comm: Comm
	) -> c_int => Scatterv;
	fn MPI_Scan(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: Count, datatype: Datatype, op: Op, comm: Comm
	) -> c_int => Scan;
	fn MPI_Exscan(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: Count, datatype: Datatype, op: Op, comm: Comm
	) -> c_int => Exscan;

	// Non-blocking primitives
	fn MPI_Ibsend(
		buf: SendBuf, count: Count, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm, request: *mut Request
	) -> c_int => Ibsend;
	fn MPI_Irecv(
		buf: RecvBuf, count: Count, datatype: Datatype, source: c_int, tag: c_int, comm: Comm,
		request: *mut Request
	) -> c_int => Irecv;
	fn MPI_Irsend(
		buf: SendBuf, count: Count, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm, request: *mut Request
	) -> c_int => Irsend;
	fn MPI_Isend(
		buf: SendBuf, count: Count, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm, request: *mut Request
	) -> c_int => Isend;
	fn MPI_Issend(
		buf: SendBuf, count: Count, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm, request: *mut Request
	) -> c_int => Issend;
	fn MPI_Isendrecv(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, dest: c_int, sendtag: c_int,
		recvbuf: RecvBuf, recvcount: Count, recvtype: Datatype, source: c_int, recvtag: c_int,
		comm: Comm, request: *mut Request
	) -> c_int => Isendrecv;
	fn MPI_Isendrecv_replace(
		buf: RecvBuf, count: Count, datatype: Datatype, dest: c_int, sendtag: c_int, source: c_int,
		recvtag: c_int, comm: Comm, request: *mut Request
	) -> c_int => IsendrecvReplace;

	// Non-blocking collectives
	fn MPI_Iallgather(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcount: Count,
		recvtype: Datatype, comm: Comm, request: *mut Request
	) -> c_int => Iallgather;
	fn MPI_Iallgatherv(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcounts: *const Count,
		displs: *const c_int, recvtype: Datatype, comm: Comm, request: *mut Request
	) -> c_int => Iallgatherv;
	fn MPI_Iallreduce(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: Count, datatype: Datatype, op: Op, comm: Comm,
		request: *mut Request
	) -> c_int => Iallreduce;
	fn MPI_Ialltoall(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcount: Count,
		recvtype: Datatype, comm: Comm, request: *mut Request
	) -> c_int => Ialltoall;
	fn MPI_Ialltoallv(
		sendbuf: SendBuf, sendcounts: *const Count, sdispls: *const c_int, sendtype: Datatype,
		recvbuf: RecvBuf, recvcounts: *const Count, rdispls: *const c_int, recvtype: Datatype, comm: Comm,
		request: *mut Request
	) -> c_int => Ialltoallv;
	fn MPI_Ialltoallw(
		sendbuf: SendBuf, sendcounts: *const Count, sdispls: *const c_int, sendtypes: *const Datatype,
		recvbuf: RecvBuf, recvcounts: *const Count, rdispls: *const c_int, recvtypes: *const Datatype,
		comm: Comm, request: *mut Request
	) -> c_int => Ialltoallw;
	fn MPI_Ibarrier(comm: Comm, request: *mut Request) -> c_int => Ibarrier;
	fn MPI_Ibcast(
		buffer: RecvBuf, count: Count, datatype: Datatype, root: c_int, comm: Comm, request: *mut Request
	) -> c_int => Ibcast;
	fn MPI_Igather(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcount: Count,
		recvtype: Datatype, root: c_int, comm: Comm, request: *mut Request
	) -> c_int => Igather;
	fn MPI_Igatherv(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcounts: *const Count,
		displs: *const c_int, recvtype: Datatype, root: c_int, comm: Comm, request: *mut Request
	) -> c_int => Igatherv;
	fn MPI_Ireduce(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: Count, datatype: Datatype, op: Op, root: c_int, comm: Comm,
		request: *mut Request
	) -> c_int => Ireduce;
	fn MPI_Ireduce_scatter(
		sendbuf: SendBuf, recvbuf: RecvBuf, recvcounts: *const Count, datatype: Datatype, op: Op, comm: Comm,
		request: *mut Request
	) -> c_int => IreduceScatter;
	fn MPI_Ireduce_scatter_block(
		sendbuf: SendBuf, recvbuf: RecvBuf, recvcount: Count, datatype: Datatype, op: Op, comm: Comm,
		request: *mut Request
	) -> c_int => IreduceScatterBlock;
	fn MPI_Iscatter(
		sendbuf: SendBuf, sendcount: Count, sendtype: Datatype, recvbuf: RecvBuf, recvcount: Count,
		recvtype: Datatype, root: c_int, comm: Comm, request: *mut Request
	) -> c_int => Iscatter;
	fn MPI_Iscatterv(
		sendbuf: SendBuf, sendcounts: *const Count, displs: *const c_int, sendtype: Datatype,
		recvbuf: RecvBuf, recvcount: Count, recvtype: Datatype, root: c_int, comm: Comm, request: *mut Request
	) -> c_int => Iscatterv;
	fn MPI_Iscan(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: Count, datatype: Datatype, op: Op, comm: Comm,
		request: *mut Request
	) -> c_int => Iscan;
	fn MPI_Iexscan(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: Count, datatype: Datatype, op: Op, comm: Comm,
		request: *mut Request
	) -> c_int => Iexscan;
}

// Large count flavors share the markers of their regular counterparts
interpose! {
	binding = C;

	// Blocking primitives
	fn MPI_Bsend_c(
		buf: SendBuf, count: LargeCount, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm
	) -> c_int => Bsend, Large;
	fn MPI_Recv_c(
		buf: RecvBuf, count: LargeCount, datatype: Datatype, source: c_int, tag: c_int, comm: Comm,
		status: *mut Status
	) -> c_int => Recv, Large;
	fn MPI_Rsend_c(
		buf: SendBuf, count: LargeCount, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm
	) -> c_int => Rsend, Large;
	fn MPI_Send_c(
		buf: SendBuf, count: LargeCount, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm
	) -> c_int => Send, Large;
	fn MPI_Sendrecv_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, dest: c_int, sendtag: c_int,
		recvbuf: RecvBuf, recvcount: LargeCount, recvtype: Datatype, source: c_int, recvtag: c_int,
		comm: Comm, status: *mut Status
	) -> c_int => Sendrecv, Large;
	fn MPI_Sendrecv_replace_c(
		buf: RecvBuf, count: LargeCount, datatype: Datatype, dest: c_int, sendtag: c_int, source: c_int,
		recvtag: c_int, comm: Comm, status: *mut Status
	) -> c_int => SendrecvReplace, Large;
	fn MPI_Ssend_c(
		buf: SendBuf, count: LargeCount, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm
	) -> c_int => Ssend, Large;

	// Blocking collectives
	fn MPI_Allgather_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf, recvcount: LargeCount,
		recvtype: Datatype, comm: Comm
	) -> c_int => Allgather, Large;
	fn MPI_Allgatherv_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf,
		recvcounts: *const LargeCount, displs: *const Aint, recvtype: Datatype, comm: Comm
	) -> c_int => Allgatherv, Large;
	fn MPI_Allreduce_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: LargeCount, datatype: Datatype, op: Op, comm: Comm
	) -> c_int => Allreduce, Large;
	fn MPI_Alltoall_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf, recvcount: LargeCount,
		recvtype: Datatype, comm: Comm
	) -> c_int => Alltoall, Large;
	fn MPI_Alltoallv_c(
		sendbuf: SendBuf, sendcounts: *const LargeCount, sdispls: *const Aint, sendtype: Datatype,
		recvbuf: RecvBuf, recvcounts: *const LargeCount, rdispls: *const Aint, recvtype: Datatype, comm: Comm
	) -> c_int => Alltoallv, Large;
	fn MPI_Alltoallw_c(
		sendbuf: SendBuf, sendcounts: *const LargeCount, sdispls: *const Aint, sendtypes: *const Datatype,
		recvbuf: RecvBuf, recvcounts: *const LargeCount, rdispls: *const Aint, recvtypes: *const Datatype,
		comm: Comm
	) -> c_int => Alltoallw, Large;
	fn MPI_Barrier_c(comm: Comm) -> c_int => Barrier, Large;
	fn MPI_Bcast_c(
		buffer: RecvBuf, count: LargeCount, datatype: Datatype, root: c_int, comm: Comm
	) -> c_int => Bcast, Large;
	fn MPI_Gather_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf, recvcount: LargeCount,
		recvtype: Datatype, root: c_int, comm: Comm
	) -> c_int => Gather, Large;
	fn MPI_Gatherv_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf,
		recvcounts: *const LargeCount, displs: *const Aint, recvtype: Datatype, root: c_int, comm: Comm
	) -> c_int => Gatherv, Large;
	fn MPI_Reduce_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: LargeCount, datatype: Datatype, op: Op, root: c_int,
		comm: Comm
	) -> c_int => Reduce, Large;
	fn MPI_Reduce_scatter_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, recvcounts: *const LargeCount, datatype: Datatype, op: Op,
		comm: Comm
	) -> c_int => ReduceScatter, Large;
	fn MPI_Reduce_scatter_block_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, recvcount: LargeCount, datatype: Datatype, op: Op, comm: Comm
	) -> c_int => ReduceScatterBlock, Large;
	fn MPI_Scatter_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf, recvcount: LargeCount,
		recvtype: Datatype, root: c_int, comm: Comm
	) -> c_int => Scatter, Large;
	fn MPI_Scatterv_c(
		sendbuf: SendBuf, sendcounts: *const LargeCount, displs: *const Aint, sendtype: Datatype,
		recvbuf: RecvBuf, recvcount: LargeCount, recvtype: Datatype, root: c_int, comm: Comm
	) -> c_int => Scatterv, Large;
	fn MPI_Scan_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: LargeCount, datatype: Datatype, op: Op, comm: Comm
	) -> c_int => Scan, Large;
	fn MPI_Exscan_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: LargeCount, datatype: Datatype, op: Op, comm: Comm
	) -> c_int => Exscan, Large;

	// Non-blocking primitives
	fn MPI_Ibsend_c(
		buf: SendBuf, count: LargeCount, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm,
		request: *mut Request
	) -> c_int => Ibsend, Large;
	fn MPI_Irecv_c(
		buf: RecvBuf, count: LargeCount, datatype: Datatype, source: c_int, tag: c_int, comm: Comm,
		request: *mut Request
	) -> c_int => Irecv, Large;
	fn MPI_Irsend_c(
		buf: SendBuf, count: LargeCount, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm,
		request: *mut Request
	) -> c_int => Irsend, Large;
	fn MPI_Isend_c(
		buf: SendBuf, count: LargeCount, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm,
		request: *mut Request
	) -> c_int => Isend, Large;
	fn MPI_Isendrecv_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, dest: c_int, sendtag: c_int,
		recvbuf: RecvBuf, recvcount: LargeCount, recvtype: Datatype, source: c_int, recvtag: c_int,
		comm: Comm, request: *mut Request
	) -> c_int => Isendrecv, Large;
	fn MPI_Isendrecv_replace_c(
		buf: RecvBuf, count: LargeCount, datatype: Datatype, dest: c_int, sendtag: c_int, source: c_int,
		recvtag: c_int, comm: Comm, request: *mut Request
	) -> c_int => IsendrecvReplace, Large;
	fn MPI_Issend_c(
		buf: SendBuf, count: LargeCount, datatype: Datatype, dest: c_int, tag: c_int, comm: Comm,
		request: *mut Request
	) -> c_int => Issend, Large;

	// Non-blocking collectives
	fn MPI_Iallgather_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf, recvcount: LargeCount,
		recvtype: Datatype, comm: Comm, request: *mut Request
	) -> c_int => Iallgather, Large;
	fn MPI_Iallgatherv_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf,
		recvcounts: *const LargeCount, displs: *const Aint, recvtype: Datatype, comm: Comm,
		request: *mut Request
	) -> c_int => Iallgatherv, Large;
	fn MPI_Iallreduce_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: LargeCount, datatype: Datatype, op: Op, comm: Comm,
		request: *mut Request
	) -> c_int => Iallreduce, Large;
	fn MPI_Ialltoall_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf, recvcount: LargeCount,
		recvtype: Datatype, comm: Comm, request: *mut Request
	) -> c_int => Ialltoall, Large;
	fn MPI_Ialltoallv_c(
		sendbuf: SendBuf, sendcounts: *const LargeCount, sdispls: *const Aint, sendtype: Datatype,
		recvbuf: RecvBuf, recvcounts: *const LargeCount, rdispls: *const Aint, recvtype: Datatype, comm: Comm,
		request: *mut Request
	) -> c_int => Ialltoallv, Large;
	fn MPI_Ialltoallw_c(
		sendbuf: SendBuf, sendcounts: *const LargeCount, sdispls: *const Aint, sendtypes: *const Datatype,
		recvbuf: RecvBuf, recvcounts: *const LargeCount, rdispls: *const Aint, recvtypes: *const Datatype,
		comm: Comm, request: *mut Request
	) -> c_int => Ialltoallw, Large;
	fn MPI_Ibarrier_c(comm: Comm, request: *mut Request) -> c_int => Ibarrier, Large;
	fn MPI_Ibcast_c(
		buffer: RecvBuf, count: LargeCount, datatype: Datatype, root: c_int, comm: Comm, request: *mut Request
	) -> c_int => Ibcast, Large;
	fn MPI_Igather_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf, recvcount: LargeCount,
		recvtype: Datatype, root: c_int, comm: Comm, request: *mut Request
	) -> c_int => Igather, Large;
	fn MPI_Igatherv_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf,
		recvcounts: *const LargeCount, displs: *const Aint, recvtype: Datatype, root: c_int, comm: Comm,
		request: *mut Request
	) -> c_int => Igatherv, Large;
	fn MPI_Ireduce_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: LargeCount, datatype: Datatype, op: Op, root: c_int,
		comm: Comm, request: *mut Request
	) -> c_int => Ireduce, Large;
	fn MPI_Ireduce_scatter_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, recvcounts: *const LargeCount, datatype: Datatype, op: Op,
		comm: Comm, request: *mut Request
	) -> c_int => IreduceScatter, Large;
	fn MPI_Ireduce_scatter_block_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, recvcount: LargeCount, datatype: Datatype, op: Op, comm: Comm,
		request: *mut Request
	) -> c_int => IreduceScatterBlock, Large;
	fn MPI_Iscatter_c(
		sendbuf: SendBuf, sendcount: LargeCount, sendtype: Datatype, recvbuf: RecvBuf, recvcount: LargeCount,
		recvtype: Datatype, root: c_int, comm: Comm, request: *mut Request
	) -> c_int => Iscatter, Large;
	fn MPI_Iscatterv_c(
		sendbuf: SendBuf, sendcounts: *const LargeCount, displs: *const Aint, sendtype: Datatype,
		recvbuf: RecvBuf, recvcount: LargeCount, recvtype: Datatype, root: c_int, comm: Comm,
		request: *mut Request
	) -> c_int => Iscatterv, Large;
	fn MPI_Iscan_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: LargeCount, datatype: Datatype, op: Op, comm: Comm,
		request: *mut Request
	) -> c_int => Iscan, Large;
	fn MPI_Iexscan_c(
		sendbuf: SendBuf, recvbuf: RecvBuf, count: LargeCount, datatype: Datatype, op: Op, comm: Comm,
		request: *mut Request
	) -> c_int => Iexscan, Large;
}
