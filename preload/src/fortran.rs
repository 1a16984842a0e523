//! Fortran binding wrappers
//!
//! Every argument is passed by reference and the error code is returned
//! through a trailing argument.

use std::ffi::c_void;

use sonar_rs::{Binding, CallSite, Flavor, Operation, Result, Runtime, SonarError, interpose, runtime};

use crate::abi::{FORTRAN_COMM_WORLD, Fint, SUCCESS};

/// Any handle, count, rank, tag or flag argument
type Arg = *mut Fint;

/// Any buffer argument
type Buf = *mut c_void;

type CommQuery = unsafe extern "C" fn(*const Fint, *mut Fint, *mut Fint);

/// Rank and size of the process in `MPI_COMM_WORLD`
fn identity(runtime: &Runtime) -> Result<(i32, i32)> {
	let comm_rank: CommQuery = unsafe { runtime.resolve("mpi_comm_rank_")? };
	let comm_size: CommQuery = unsafe { runtime.resolve("mpi_comm_size_")? };

	let world = FORTRAN_COMM_WORLD;
	let mut err = SUCCESS;

	let mut rank = 0;
	unsafe { comm_rank(&world, &mut rank, &mut err) };
	if err != SUCCESS {
		return Err(SonarError::from("Could not retrieve the MPI rank"));
	}

	let mut size = 0;
	unsafe { comm_size(&world, &mut size, &mut err) };
	if err != SUCCESS {
		return Err(SonarError::from("Could not retrieve the MPI rank size"));
	}

	Ok((rank, size))
}

static INIT: CallSite = CallSite::new("mpi_init_", Operation::Init, Binding::Fortran, Flavor::Regular);
static INIT_THREAD: CallSite =
	CallSite::new("mpi_init_thread_", Operation::InitThread, Binding::Fortran, Flavor::Regular);
static FINALIZE: CallSite = CallSite::new("mpi_finalize_", Operation::Finalize, Binding::Fortran, Flavor::Regular);

#[unsafe(no_mangle)]
pub unsafe extern "C" fn mpi_init_(err: Arg) {
	let forward = |real: unsafe extern "C" fn(Arg)| unsafe { real(err) };
	unsafe { runtime().process_init(&INIT, forward, identity) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn mpi_init_thread_(required: Arg, provided: Arg, err: Arg) {
	let forward = |real: unsafe extern "C" fn(Arg, Arg, Arg)| unsafe { real(required, provided, err) };
	unsafe { runtime().process_init(&INIT_THREAD, forward, identity) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn mpi_finalize_(err: Arg) {
	let forward = |real: unsafe extern "C" fn(Arg)| unsafe { real(err) };
	unsafe { runtime().process_finalize(&FINALIZE, forward) }
}

interpose! {
	binding = Fortran;

	// Waiting requests
	fn mpi_wait_(request: Arg, status: Arg, err: Arg) => Wait;
	fn mpi_waitall_(count: Arg, requests: Arg, statuses: Arg, err: Arg) => Waitall;
	fn mpi_waitany_(count: Arg, requests: Arg, index: Arg, status: Arg, err: Arg) => Waitany;
	fn mpi_waitsome_(incount: Arg, requests: Arg, outcount: Arg, indices: Arg, statuses: Arg, err: Arg) => Waitsome;

	// Testing requests
	fn mpi_test_(request: Arg, flag: Arg, status: Arg, err: Arg) => Test;
	fn mpi_testall_(count: Arg, requests: Arg, flag: Arg, statuses: Arg, err: Arg) => Testall;
	fn mpi_testany_(count: Arg, requests: Arg, index: Arg, flag: Arg, status: Arg, err: Arg) => Testany;
	fn mpi_testsome_(incount: Arg, requests: Arg, outcount: Arg, indices: Arg, statuses: Arg, err: Arg) => Testsome;

	// Blocking primitives
	fn mpi_bsend_(buf: Buf, count: Arg, datatype: Arg, dest: Arg, tag: Arg, comm: Arg, err: Arg) => Bsend;
	fn mpi_recv_(
		buf: Buf, count: Arg, datatype: Arg, source: Arg, tag: Arg, comm: Arg, status: Arg, err: Arg
	) => Recv;
	fn mpi_rsend_(buf: Buf, count: Arg, datatype: Arg, dest: Arg, tag: Arg, comm: Arg, err: Arg) => Rsend;
	fn mpi_send_(buf: Buf, count: Arg, datatype: Arg, dest: Arg, tag: Arg, comm: Arg, err: Arg) => Send;
	fn mpi_sendrecv_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, dest: Arg, sendtag: Arg, recvbuf: Buf, recvcount: Arg,
		recvtype: Arg, source: Arg, recvtag: Arg, comm: Arg, status: Arg, err: Arg
	) => Sendrecv;
	fn mpi_sendrecv_replace_(
		buf: Buf, count: Arg, datatype: Arg, dest: Arg, sendtag: Arg, source: Arg, recvtag: Arg, comm: Arg,
		status: Arg, err: Arg
	) => SendrecvReplace;
	fn mpi_ssend_(buf: Buf, count: Arg, datatype: Arg, dest: Arg, tag: Arg, comm: Arg, err: Arg) => Ssend;

	// Blocking collectives
	fn mpi_allgather_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg, comm: Arg,
		err: Arg
	) => Allgather;
	fn mpi_allgatherv_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcounts: Arg, displs: Arg, recvtype: Arg,
		comm: Arg, err: Arg
	) => Allgatherv;
	fn mpi_allreduce_(
		sendbuf: Buf, recvbuf: Buf, count: Arg, datatype: Arg, op: Arg, comm: Arg, err: Arg
	) => Allreduce;
	fn mpi_alltoall_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg, comm: Arg,
		err: Arg
	) => Alltoall;
	fn mpi_alltoallv_(
		sendbuf: Buf, sendcounts: Arg, sdispls: Arg, sendtype: Arg, recvbuf: Buf, recvcounts: Arg,
		rdispls: Arg, recvtype: Arg, comm: Arg, err: Arg
	) => Alltoallv;
	fn mpi_alltoallw_(
		sendbuf: Buf, sendcounts: Arg, sdispls: Arg, sendtypes: Arg, recvbuf: Buf, recvcounts: Arg,
		rdispls: Arg, recvtypes: Arg, comm: Arg, err: Arg
	) => Alltoallw;
	fn mpi_barrier_(comm: Arg, err: Arg) => Barrier;
	fn mpi_bcast_(buffer: Buf, count: Arg, datatype: Arg, root: Arg, comm: Arg, err: Arg) => Bcast;
	fn mpi_gather_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg, root: Arg,
		comm: Arg, err: Arg
	) => Gather;
	fn mpi_gatherv_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcounts: Arg, displs: Arg, recvtype: Arg,
		root: Arg, comm: Arg, err: Arg
	) => Gatherv;
	fn mpi_reduce_(
		sendbuf: Buf, recvbuf: Buf, count: Arg, datatype: Arg, op: Arg, root: Arg, comm: Arg, err: Arg
	) => Reduce;
	fn mpi_reduce_scatter_(
		sendbuf: Buf, recvbuf: Buf, recvcounts: Arg, datatype: Arg, op: Arg, comm: Arg, err: Arg
	) => ReduceScatter;
	fn mpi_reduce_scatter_block_(
		sendbuf: Buf, recvbuf: Buf, recvcount: Arg, datatype: Arg, op: Arg, comm: Arg, err: Arg
	) => ReduceScatterBlock;
	fn mpi_scatter_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg, root: Arg,
		comm: Arg, err: Arg
	) => Scatter;
	fn mpi_scatterv_(
		sendbuf: Buf, sendcounts: Arg, displs: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg,
		root: Arg, comm: Arg, err: Arg
	) => Scatterv;
	fn mpi_scan_(sendbuf: Buf, recvbuf: Buf, count: Arg, datatype: Arg, op: Arg, comm: Arg, err: Arg) => Scan;
	fn mpi_exscan_(sendbuf: Buf, recvbuf: Buf, count: Arg, datatype: Arg, op: Arg, comm: Arg, err: Arg) => Exscan;

	// Non-blocking primitives
	fn mpi_ibsend_(
		buf: Buf, count: Arg, datatype: Arg, dest: Arg, tag: Arg, comm: Arg, request: Arg, err: Arg
	) => Ibsend;
	fn mpi_irecv_(
		buf: Buf, count: Arg, datatype: Arg, source: Arg, tag: Arg, comm: Arg, request: Arg, err: Arg
	) => Irecv;
	fn mpi_irsend_(
		buf: Buf, count: Arg, datatype: Arg, dest: Arg, tag: Arg, comm: Arg, request: Arg, err: Arg
	) => Irsend;
	fn mpi_isend_(
		buf: Buf, count: Arg, datatype: Arg, dest: Arg, tag: Arg, comm: Arg, request: Arg, err: Arg
	) => Isend;
	fn mpi_issend_(
		buf: Buf, count: Arg, datatype: Arg, dest: Arg, tag: Arg, comm: Arg, request: Arg, err: Arg
	) => Issend;
	fn mpi_isendrecv_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, dest: Arg, sendtag: Arg, recvbuf: Buf, recvcount: Arg,
		recvtype: Arg, source: Arg, recvtag: Arg, comm: Arg, request: Arg, err: Arg
	) => Isendrecv;
	fn mpi_isendrecv_replace_(
		buf: Buf, count: Arg, datatype: Arg, dest: Arg, sendtag: Arg, source: Arg, recvtag: Arg, comm: Arg,
		request: Arg, err: Arg
	) => IsendrecvReplace;

	// Non-blocking collectives
	fn mpi_iallgather_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg, comm: Arg,
		request: Arg, err: Arg
	) => Iallgather;
	fn mpi_iallgatherv_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcounts: Arg, displs: Arg, recvtype: Arg,
		comm: Arg, request: Arg, err: Arg
	) => Iallgatherv;
	fn mpi_iallreduce_(
		sendbuf: Buf, recvbuf: Buf, count: Arg, datatype: Arg, op: Arg, comm: Arg, request: Arg, err: Arg
	) => Iallreduce;
	fn mpi_ialltoall_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg, comm: Arg,
		request: Arg, err: Arg
	) => Ialltoall;
	fn mpi_ialltoallv_(
		sendbuf: Buf, sendcounts: Arg, sdispls: Arg, sendtype: Arg, recvbuf: Buf, recvcounts: Arg,
		rdispls: Arg, recvtype: Arg, comm: Arg, request: Arg, err: Arg
	) => Ialltoallv;
	fn mpi_ialltoallw_(
		sendbuf: Buf, sendcounts: Arg, sdispls: Arg, sendtypes: Arg, recvbuf: Buf, recvcounts: Arg,
		rdispls: Arg, recvtypes: Arg, comm: Arg, request: Arg, err: Arg
	) => Ialltoallw;
	fn mpi_ibarrier_(comm: Arg, request: Arg, err: Arg) => Ibarrier;
	fn mpi_ibcast_(
		buffer: Buf, count: Arg, datatype: Arg, root: Arg, comm: Arg, request: Arg, err: Arg
	) => Ibcast;
	fn mpi_igather_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg, root: Arg,
		comm: Arg, request: Arg, err: Arg
	) => Igather;
	fn mpi_igatherv_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcounts: Arg, displs: Arg, recvtype: Arg,
		root: Arg, comm: Arg, request: Arg, err: Arg
	) => Igatherv;
	fn mpi_ireduce_(
		sendbuf: Buf, recvbuf: Buf, count: Arg, datatype: Arg, op: Arg, root: Arg, comm: Arg, request: Arg,
		err: Arg
	) => Ireduce;
	fn mpi_ireduce_scatter_(
		sendbuf: Buf, recvbuf: Buf, recvcounts: Arg, datatype: Arg, op: Arg, comm: Arg, request: Arg, err: Arg
	) => IreduceScatter;
	fn mpi_ireduce_scatter_block_(
		sendbuf: Buf, recvbuf: Buf, recvcount: Arg, datatype: Arg, op: Arg, comm: Arg, request: Arg, err: Arg
	) => IreduceScatterBlock;
	fn mpi_iscatter_(
		sendbuf: Buf, sendcount: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg, root: Arg,
		comm: Arg, request: Arg, err: Arg
	) => Iscatter;
	fn mpi_iscatterv_(
		sendbuf: Buf, sendcounts: Arg, displs: Arg, sendtype: Arg, recvbuf: Buf, recvcount: Arg, recvtype: Arg,
		root: Arg, comm: Arg, request: Arg, err: Arg
	) => Iscatterv;
	fn mpi_iscan_(
		sendbuf: Buf, recvbuf: Buf, count: Arg, datatype: Arg, op: Arg, comm: Arg, request: Arg, err: Arg
	) => Iscan;
	fn mpi_iexscan_(
		sendbuf: Buf, recvbuf: Buf, count: Arg, datatype: Arg, op: Arg, comm: Arg, request: Arg, err: Arg
	) => Iexscan;
}
