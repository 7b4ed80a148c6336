#![cfg(feature = "serde")]
use echo_schnorr::{
    KeyPair, Schnorr,
    musig2::{
        MuSig2Error, MuSig2Session, NonceKeyPair, Phase, SessionWire, WireError, generate_nonce,
    },
};

fn setup(n: usize, message: &[u8]) -> (MuSig2Session, Vec<(KeyPair, NonceKeyPair)>) {
    let parties = (0..n)
        .map(|i| {
            let keypair = KeyPair::random(&mut rand::thread_rng());
            let extra = Some(&b"wire"[..]);
            let nonce = generate_nonce(keypair.secret_key(), &[i as u8; 20], message, extra).unwrap();
            (keypair, nonce)
        })
        .collect::<Vec<_>>();
    let keys = parties
        .iter()
        .map(|(keypair, _)| *keypair.public_key())
        .collect::<Vec<_>>();
    (MuSig2Session::create(&keys, message).unwrap(), parties)
}

fn round_trip(session: &MuSig2Session) -> MuSig2Session {
    let json = serde_json::to_string(&session.to_wire()).unwrap();
    let wire = serde_json::from_str::<SessionWire>(&json).unwrap();
    MuSig2Session::from_wire(&wire).unwrap()
}

#[test]
fn round_trip_through_every_phase() {
    let message = b"persist me";
    let (mut session, parties) = setup(3, message);
    assert_eq!(round_trip(&session), session);

    session
        .register_nonce(parties[0].0.public_key(), parties[0].1.public().as_bytes())
        .unwrap();
    assert_eq!(round_trip(&session), session);

    for (keypair, nonce) in &parties[1..] {
        session
            .register_nonce(keypair.public_key(), nonce.public().as_bytes())
            .unwrap();
    }
    assert_eq!(session.phase(), Phase::NonceFinalized);
    let restored = round_trip(&session);
    assert_eq!(restored, session);
    assert_eq!(restored.challenge(), session.challenge());

    for (i, (keypair, nonce)) in parties.iter().enumerate() {
        let partial = session
            .compute_partial_signature(keypair.public_key(), keypair.secret_key(), nonce.secret())
            .unwrap();
        session
            .add_partial_signature(keypair.public_key(), &partial.to_bytes())
            .unwrap();
        if i == 0 {
            assert_eq!(session.phase(), Phase::CollectingPartials);
            assert_eq!(round_trip(&session), session);
        }
    }

    let restored = round_trip(&session);
    assert_eq!(restored.phase(), Phase::Complete);
    let signature = restored.final_signature().unwrap();
    assert_eq!(signature, session.final_signature().unwrap());
    assert!(Schnorr.verify(
        restored.agg_public_key().as_bytes(),
        message,
        &signature.to_bytes()
    ));
}

#[test]
fn json_field_names() {
    let (session, _) = setup(2, b"m");
    let json = serde_json::to_value(session.to_wire()).unwrap();
    let object = json.as_object().unwrap();
    for field in [
        "message",
        "public_keys",
        "aggregated_public_key",
        "key_parity",
        "coefficients",
        "nonces",
        "aggregated_nonce",
        "nonce_parity",
        "partial_signatures",
    ] {
        assert!(object.contains_key(field), "missing {}", field);
    }
    assert!(object["aggregated_nonce"].is_null());
    assert_eq!(object["message"], "6d");
}

#[test]
fn refuses_inconsistent_wire_forms() {
    let message = b"tamper";
    let (mut session, parties) = setup(2, message);
    for (keypair, nonce) in &parties {
        session
            .register_nonce(keypair.public_key(), nonce.public().as_bytes())
            .unwrap();
    }
    let wire = session.to_wire();
    let other = KeyPair::random(&mut rand::thread_rng())
        .public_key()
        .to_string();

    let mut bad = wire.clone();
    bad.aggregated_public_key = other.clone();
    assert_eq!(
        MuSig2Session::from_wire(&bad),
        Err(MuSig2Error::Wire(WireError::Mismatch {
            field: "aggregated_public_key"
        }))
    );

    let mut bad = wire.clone();
    bad.key_parity ^= 1;
    assert_eq!(
        MuSig2Session::from_wire(&bad),
        Err(MuSig2Error::Wire(WireError::Mismatch {
            field: "key_parity"
        }))
    );

    let mut bad = wire.clone();
    let first = wire.public_keys[0].clone();
    bad.coefficients.insert(
        first,
        "0000000000000000000000000000000000000000000000000000000000000002".into(),
    );
    assert_eq!(
        MuSig2Session::from_wire(&bad),
        Err(MuSig2Error::Wire(WireError::Mismatch {
            field: "coefficients"
        }))
    );

    let mut bad = wire.clone();
    bad.aggregated_nonce = Some(other.clone());
    assert_eq!(
        MuSig2Session::from_wire(&bad),
        Err(MuSig2Error::Wire(WireError::Mismatch {
            field: "aggregated_nonce"
        }))
    );

    let mut bad = wire.clone();
    bad.nonce_parity ^= 1;
    assert_eq!(
        MuSig2Session::from_wire(&bad),
        Err(MuSig2Error::Wire(WireError::Mismatch {
            field: "nonce_parity"
        }))
    );

    let mut bad = wire.clone();
    bad.nonces.remove(&wire.public_keys[1]);
    bad.nonces.insert(other.clone(), other.clone());
    assert!(matches!(
        MuSig2Session::from_wire(&bad),
        Err(MuSig2Error::UnknownParticipant(_))
    ));
}
