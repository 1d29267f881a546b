//! Tests for [`Server::evaluate_batch()`].

#![cfg(test)]
#![expect(
	clippy::cargo_common_metadata,
	clippy::indexing_slicing,
	reason = "tests"
)]

mod util;

use oprf_server::cipher_suite::CipherSuite;
use oprf_server::group::Group;
use oprf_server::{Base, BlindedElement, Error, Server, Verifiable};
use rand_core::OsRng;
use util::{Client, INFO};

const INPUTS: [&[u8]; 4] = [b"first", b"second", b"third", b"fourth"];

test_ciphersuites!(alignment);

/// Tests that every output lines up with its input.
fn alignment<CS: CipherSuite>() {
	let server = Server::<CS, Base>::new(&mut OsRng).unwrap();
	let clients = Client::<CS>::batch::<Base>(&INPUTS);
	let blinded_elements: Vec<&[u8]> = clients.iter().map(Client::blinded_element).collect();

	let evaluation = server.evaluate_batch(&blinded_elements).unwrap();
	assert_eq!(evaluation.len(), INPUTS.len());
	assert!(evaluation.proof_pair().is_none());

	for ((client, input), evaluation_element) in
		clients.iter().zip(INPUTS).zip(evaluation.elements())
	{
		let output = client.finalize(input, evaluation_element, INFO);
		assert_eq!(output, server.full_evaluate(input, INFO).unwrap());
	}

	// Every single evaluation matches its batched counterpart.
	for (index, blinded_element) in blinded_elements.iter().enumerate() {
		let single = server.evaluate(blinded_element).unwrap();
		assert_eq!(single.elements()[0], evaluation.elements()[index]);
	}
}

test_ciphersuites!(verifiable);

/// Tests that a single [`Proof`](oprf_server::Proof) covers the whole batch.
fn verifiable<CS: CipherSuite>() {
	let server = Server::<CS, Verifiable>::new(&mut OsRng).unwrap();
	let clients = Client::<CS>::batch::<Verifiable>(&INPUTS);
	let blinded_elements: Vec<&[u8]> = clients.iter().map(Client::blinded_element).collect();

	let evaluation = server
		.evaluate_batch(&mut OsRng, &blinded_elements)
		.unwrap();
	assert_eq!(evaluation.len(), INPUTS.len());

	let decoded: Vec<BlindedElement<CS>> = blinded_elements
		.iter()
		.map(|bytes| BlindedElement::from_repr(bytes).unwrap())
		.collect();
	evaluation
		.proof()
		.verify(server.public_key(), &decoded, evaluation.elements())
		.unwrap();

	// The proof doesn't verify a subset of the batch.
	assert_eq!(
		evaluation
			.proof()
			.verify(server.public_key(), &decoded[..3], &evaluation.elements()[..3])
			.unwrap_err(),
		Error::Proof
	);

	for ((client, input), evaluation_element) in
		clients.iter().zip(INPUTS).zip(evaluation.elements())
	{
		let output = client.finalize(input, evaluation_element, INFO);
		assert!(server.verify_finalize(input, &output, INFO));
	}
}

test_ciphersuites!(invalid_element);

/// Tests that an invalid element fails the whole batch with its index.
fn invalid_element<CS: CipherSuite>() {
	let clients = Client::<CS>::batch::<Base>(&INPUTS[..3]);
	let identity = CS::Group::element_to_repr(&CS::Group::element_identity());
	let blinded_elements: [&[u8]; 4] = [
		clients[0].blinded_element(),
		clients[1].blinded_element(),
		&identity,
		clients[2].blinded_element(),
	];

	let server = Server::<CS, Base>::new(&mut OsRng).unwrap();
	assert_eq!(
		server.evaluate_batch(&blinded_elements).unwrap_err(),
		Error::BlindedElement(2)
	);

	let server = Server::<CS, Verifiable>::new(&mut OsRng).unwrap();
	assert_eq!(
		server
			.evaluate_batch(&mut OsRng, &blinded_elements)
			.unwrap_err(),
		Error::BlindedElement(2)
	);

	// The first invalid element is reported.
	let blinded_elements: [&[u8]; 3] = [clients[0].blinded_element(), &[0xFF; 32], &identity];
	assert_eq!(
		server
			.evaluate_batch(&mut OsRng, &blinded_elements)
			.unwrap_err(),
		Error::BlindedElement(1)
	);
}

test_ciphersuites!(size);

/// Tests [`Error::Batch`] on empty and oversized batches.
fn size<CS: CipherSuite>() {
	let client = Client::<CS>::blind::<Base>(b"input");

	let server = Server::<CS, Base>::new(&mut OsRng).unwrap();
	assert_eq!(
		server.evaluate_batch::<&[u8]>(&[]).unwrap_err(),
		Error::Batch
	);

	let oversized = vec![client.blinded_element(); usize::from(u16::MAX) + 1];
	assert_eq!(
		server.evaluate_batch(&oversized).unwrap_err(),
		Error::Batch
	);

	let server = Server::<CS, Verifiable>::new(&mut OsRng).unwrap();
	assert_eq!(
		server
			.evaluate_batch::<_, &[u8]>(&mut OsRng, &[])
			.unwrap_err(),
		Error::Batch
	);
	assert_eq!(
		server
			.evaluate_batch(&mut OsRng, &oversized)
			.unwrap_err(),
		Error::Batch
	);
}
